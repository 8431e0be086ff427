use std::{
    cell::{Ref, RefCell},
    fmt::Debug,
    rc::Rc,
};

/// Handle returned by `subscribe`, used to detach the callback again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

struct Subscribers<T: ?Sized> {
    next_id: u64,
    callbacks: Vec<(Subscription, Callback<T>)>,
}

impl<T: ?Sized> Default for Subscribers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T: ?Sized> Subscribers<T> {
    fn add(&mut self, cb: Callback<T>) -> Subscription {
        let id = Subscription(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, cb));
        id
    }

    fn remove(&mut self, id: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(sid, _)| *sid != id);
        before != self.callbacks.len()
    }

    fn notify(&mut self, value: &T) {
        for (_, cb) in &mut self.callbacks {
            cb(value);
        }
    }
}

/// Shared single-threaded value cell with change notification.
///
/// Clones share the same cell, so a clone handed to a widget observes writes made
/// through the original handle. Subscribers are called synchronously from the
/// mutating call and must not write to the same observable.
pub struct Observable<T: Clone> {
    value: Rc<RefCell<T>>,
    subscribers: Rc<RefCell<Subscribers<T>>>,
}

impl<T: Clone> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Debug> Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Observable").field(&*self.value.borrow()).finish()
    }
}

impl<T: Clone> From<T> for Observable<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            subscribers: Rc::default(),
        }
    }

    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// Reads the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Replaces the value and notifies every subscriber, even if the value is unchanged.
    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.notify();
    }

    pub fn subscribe(&self, cb: impl FnMut(&T) + 'static) -> Subscription {
        self.subscribers.borrow_mut().add(Box::new(cb))
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&self, id: Subscription) -> bool {
        self.subscribers.borrow_mut().remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().callbacks.len()
    }

    fn notify(&self) {
        let value = self.value.borrow().clone();
        self.subscribers.borrow_mut().notify(&value);
    }
}

impl<T: Clone + PartialEq> Observable<T> {
    /// Writes `value` and notifies only if it differs from the current one.
    /// Returns whether the value changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

/// Shared single-threaded sequence with change notification.
///
/// Every mutation notifies subscribers with the new contents.
pub struct ObservableVec<T: Clone> {
    items: Rc<RefCell<Vec<T>>>,
    subscribers: Rc<RefCell<Subscribers<[T]>>>,
}

impl<T: Clone> Clone for ObservableVec<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            subscribers: Rc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone> Default for ObservableVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Debug> Debug for ObservableVec<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

impl<T: Clone> From<Vec<T>> for ObservableVec<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(RefCell::new(items)),
            subscribers: Rc::default(),
        }
    }
}

impl<T: Clone> FromIterator<T> for ObservableVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl<T: Clone> ObservableVec<T> {
    pub fn new() -> Self {
        Self::from(Vec::new())
    }

    /// Snapshot of the current contents.
    pub fn get(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    /// Borrowing read access. The borrow must be released before mutating.
    pub fn borrow(&self) -> Ref<'_, Vec<T>> {
        self.items.borrow()
    }

    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn push(&self, item: T) {
        self.items.borrow_mut().push(item);
        self.notify();
    }

    pub fn retain(&self, f: impl FnMut(&T) -> bool) {
        self.items.borrow_mut().retain(f);
        self.notify();
    }

    pub fn replace(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        self.notify();
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    pub fn subscribe(&self, cb: impl FnMut(&[T]) + 'static) -> Subscription {
        self.subscribers.borrow_mut().add(Box::new(cb))
    }

    pub fn unsubscribe(&self, id: Subscription) -> bool {
        self.subscribers.borrow_mut().remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().callbacks.len()
    }

    fn notify(&self) {
        let items = self.items.borrow().clone();
        self.subscribers.borrow_mut().notify(&items);
    }
}
