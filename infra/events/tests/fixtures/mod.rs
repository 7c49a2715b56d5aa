use herald_event_bus::Handler;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A handler that only counts its invocations.
#[must_use]
pub fn counting_handler() -> (Handler, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let handler = Handler::new(move |_event| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (handler, count)
}

/// Shared invocation log for asserting dispatch order across handlers.
#[must_use]
pub fn invocation_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

/// A handler that appends `label` to `log` on every invocation.
#[must_use]
pub fn labeled_handler(log: &Arc<Mutex<Vec<String>>>, label: &str) -> Handler {
    let sink = Arc::clone(log);
    let label = label.to_owned();
    Handler::new(move |_event| {
        sink.lock().expect("log poisoned").push(label.clone());
    })
}

/// Drains and returns the entries recorded so far.
#[must_use]
pub fn drain(log: &Arc<Mutex<Vec<String>>>) -> Vec<String> {
    std::mem::take(&mut *log.lock().expect("log poisoned"))
}
