use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadPan {
    pub diff: [f32; 2],
    pub new_offset: [f32; 2],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadZoom {
    pub diff: f32,
    pub new_scale: f32,
}

/// Emitted after the diagram was thrown away and laid out again.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayloadRebuild {
    pub nodes: usize,
    pub links: usize,
    pub forced: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    Pan(PayloadPan),
    Zoom(PayloadZoom),
    Rebuild(PayloadRebuild),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_contract_pan() {
        let event = Event::Pan(PayloadPan {
            diff: [1.0, 2.0],
            new_offset: [3.0, 4.0],
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Pan":{"diff":[1.0,2.0],"new_offset":[3.0,4.0]}}"#);

        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_contract_rebuild() {
        let event = Event::Rebuild(PayloadRebuild {
            nodes: 2,
            links: 1,
            forced: true,
        });
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"Rebuild":{"nodes":2,"links":1,"forced":true}}"#);
    }
}
