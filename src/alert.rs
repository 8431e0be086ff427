use std::{fmt, str::FromStr};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{error::Error, observable::Observable};

pub const DEFAULT_TITLE: &str = "An unknown error occurred.";
pub const DEFAULT_MESSAGE: &str = "Please contact your system administrator for more details.";

/// Display level of an alert. Drives the colors used when drawing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCategory {
    Info,
    Success,
    Warning,
    #[default]
    Danger,
}

impl AlertCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlertCategory {
    type Err = Error;

    /// Accepts both the bare level and its `alert-` prefixed css class form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = s.trim();
        let level = level.strip_prefix("alert-").unwrap_or(level);
        match level {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Error body returned by the server. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorPayload {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            message: Some(message.into()),
        }
    }

    /// Parses a server response body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the body is not a json object.
    pub fn from_json(body: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(body)?)
    }
}

pub type AlertCallback = Box<dyn FnMut()>;

/// Confirm or cancel action attached to an [`AlertPresenter`].
///
/// Only exists when the caller supplied a callback, so an absent action is `None`
/// on the presenter rather than a no-op.
pub struct AlertAction {
    active: Observable<bool>,
    callback: AlertCallback,
}

impl fmt::Debug for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlertAction").finish_non_exhaustive()
    }
}

impl AlertAction {
    fn new(active: Observable<bool>, callback: AlertCallback) -> Self {
        Self { active, callback }
    }

    /// Closes the alert, then runs the callback.
    pub fn invoke(&mut self) {
        self.active.set_if_changed(false);
        (self.callback)();
    }
}

/// Presentation state for a dismissible alert built from a server error payload.
#[derive(Debug)]
pub struct AlertPresenter {
    pub category: Observable<AlertCategory>,
    pub title: Observable<String>,
    pub message: Observable<String>,
    pub active: Observable<bool>,

    pub confirm: Option<AlertAction>,
    pub cancel: Option<AlertAction>,
}

impl AlertPresenter {
    pub fn new(
        category: AlertCategory,
        payload: Option<ErrorPayload>,
        on_cancel: Option<AlertCallback>,
        on_confirm: Option<AlertCallback>,
    ) -> Self {
        let payload = payload.unwrap_or_default();
        let active = Observable::new(true);

        Self {
            category: Observable::new(category),
            title: Observable::new(payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string())),
            message: Observable::new(
                payload
                    .message
                    .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            ),
            confirm: on_confirm.map(|cb| AlertAction::new(active.clone(), cb)),
            cancel: on_cancel.map(|cb| AlertAction::new(active.clone(), cb)),
            active,
        }
    }

    /// Alert without confirm or cancel actions.
    pub fn simple(category: AlertCategory, payload: Option<ErrorPayload>) -> Self {
        Self::new(category, payload, None, None)
    }

    /// Builds the presenter straight from a response body. A body that is not valid
    /// json is treated like a missing payload.
    pub fn from_response(
        category: AlertCategory,
        body: Option<&str>,
        on_cancel: Option<AlertCallback>,
        on_confirm: Option<AlertCallback>,
    ) -> Self {
        let payload = body.and_then(|b| match ErrorPayload::from_json(b) {
            Ok(p) => Some(p),
            Err(err) => {
                warn!("alert payload ignored: {err}");
                None
            }
        });
        Self::new(category, payload, on_cancel, on_confirm)
    }

    /// Deactivates the alert. Subscribers of `active` are only notified by the
    /// first call.
    pub fn close(&self) {
        if self.active.set_if_changed(false) {
            debug!("closed alert `{}`", self.title.get());
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Runs the confirm action if one was supplied. Returns whether it ran.
    pub fn confirm(&mut self) -> bool {
        match self.confirm.as_mut() {
            Some(action) => {
                action.invoke();
                true
            }
            None => false,
        }
    }

    /// Runs the cancel action if one was supplied. Returns whether it ran.
    pub fn cancel(&mut self) -> bool {
        match self.cancel.as_mut() {
            Some(action) => {
                action.invoke();
                true
            }
            None => false,
        }
    }
}
