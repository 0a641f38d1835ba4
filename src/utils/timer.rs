use std::ops::{Deref, DerefMut};

pub struct TimedResult<T> {
    pub res: T,
    pub elapsed: std::time::Duration,
}

impl<T> Deref for TimedResult<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.res
    }
}

impl<T> DerefMut for TimedResult<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.res
    }
}

pub fn timed_scope<R, F: FnOnce() -> R>(f: F) -> TimedResult<R> {
    let begin = std::time::Instant::now();
    let res = f();

    let elapsed = begin.elapsed();

    TimedResult { res, elapsed }
}

pub fn timed_scope_log<R, F: FnOnce() -> R>(label: &'static str, f: F) -> TimedResult<R> {
    let time_res = timed_scope(f);
    log::log!(target: "timer", log::Level::Info, "{}: {}", label, format_elapsed(time_res.elapsed));
    time_res
}

pub fn format_elapsed(elapsed: std::time::Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if elapsed < std::time::Duration::from_millis(1) {
        format!("{:.3}µs", secs * 1e6)
    } else if elapsed < std::time::Duration::from_secs(1) {
        format!("{:.3}ms", secs * 1e3)
    } else if elapsed < std::time::Duration::from_secs(60) {
        format!("{secs:.3}s")
    } else {
        let h = (secs / 3600.) as u32;
        let m = ((secs / 60.) % 60.) as u32;
        let s = (secs % 60.) as u32;
        format!("{h}h{m}m{s}s")
    }
}
