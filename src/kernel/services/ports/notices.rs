//! Transient user notices, rendered by the host shell.

pub trait NoticeSink {
    fn notify(&mut self, text: &str);
}
