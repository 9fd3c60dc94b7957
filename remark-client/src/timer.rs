use std::{rc::Rc, time::Duration};

use async_trait::async_trait;

/// Source of delays, so that the thread can run both in the browser and in tests
#[async_trait(?Send)]
pub trait Timer {
    async fn sleep(&self, d: Duration);
}

#[async_trait(?Send)]
impl<T: Timer + ?Sized> Timer for Rc<T> {
    async fn sleep(&self, d: Duration) {
        (**self).sleep(d).await
    }
}
