//! Thread-local interning for node and distribution names, so that
//! `deparse`/diagnostic strings can be cloned cheaply.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

thread_local! {
    static CACHE: RefCell<HashMap<String, Arc<str>>> = RefCell::new(HashMap::new());
}

/// Interns `s`, returning a cheaply-clonable `Arc<str>` shared with any
/// prior interning of an equal string on this thread.
pub fn intern(s: &str) -> Arc<str> {
    CACHE.with(|cache| {
        let mut cache = cache.borrow_mut();
        if let Some(existing) = cache.get(s) {
            Arc::clone(existing)
        } else {
            let arc: Arc<str> = Arc::from(s);
            cache.insert(s.to_string(), Arc::clone(&arc));
            arc
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_string_shares_allocation() {
        let a = intern("mu");
        let b = intern("mu");
        assert!(Arc::ptr_eq(&a, &b));
    }
}
