use std::{path::Path, sync::Arc};

use crate::{
    Color,
    error::{SinkError, SinkKind},
    log_writer::{LogFile, LogWriter},
};

/// Callback signature: `(color, rendered message, user context)`.
///
/// Callbacks run synchronously on the logging thread and must not log through
/// the logger that invokes them.
///
/// Removal matches on the function address, so it relies on the same function
/// item yielding the same address at registration and at removal. Rust does not
/// promise unique addresses: identical functions may be merged, and one function
/// may be instantiated in several codegen units. Keep a single named function per
/// registration and pass that same item to `remove_callback`.
pub type Callback<T> = fn(Color, &str, &T);

/// A registered `(function, context)` pair.
pub struct CallbackSink {
    func: usize,
    context: usize,
    call: Box<dyn Fn(Color, &str) + Send + Sync>,
}

impl CallbackSink {
    pub fn new<T: Send + Sync + 'static>(func: Callback<T>, user_data: Arc<T>) -> Self {
        Self {
            func: func as usize,
            context: Arc::as_ptr(&user_data) as *const () as usize,
            call: Box::new(move |color, message| func(color, message, &user_data)),
        }
    }

    /// Identity is the pair itself: same function and same context allocation.
    fn matches<T>(&self, func: Callback<T>, user_data: &Arc<T>) -> bool {
        self.func == func as usize && self.context == Arc::as_ptr(user_data) as *const () as usize
    }

    pub fn invoke(&self, color: Color, message: &str) {
        (self.call)(color, message)
    }
}

/// Fixed-capacity tables of file and callback sinks.
///
/// New sinks take the first free slot, and dispatch walks slots in order, so a
/// sink added after a removal may run before older ones.
pub struct SinkRegistry {
    files: Vec<Option<LogFile>>,
    callbacks: Vec<Option<CallbackSink>>,
}

impl SinkRegistry {
    pub fn new(max_files: usize, max_callbacks: usize) -> Self {
        Self {
            files: std::iter::repeat_with(|| None).take(max_files).collect(),
            callbacks: std::iter::repeat_with(|| None)
                .take(max_callbacks)
                .collect(),
        }
    }

    /// Opens `path` into the first free file slot.
    ///
    /// A full table fails before anything is opened. Both failures are
    /// reported on stderr.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P, append: bool) -> Result<(), SinkError> {
        let slot = self.free_file_slot()?;
        let file = LogFile::open(path, append).map_err(SinkError::report)?;
        *slot = Some(file);
        Ok(())
    }

    /// Stores an already opened file in the first free slot.
    pub fn attach_file(&mut self, file: LogFile) -> Result<(), SinkError> {
        *self.free_file_slot()? = Some(file);
        Ok(())
    }

    fn free_file_slot(&mut self) -> Result<&mut Option<LogFile>, SinkError> {
        let capacity = self.files.len();
        self.files
            .iter_mut()
            .find(|slot| slot.is_none())
            .ok_or_else(|| {
                SinkError::CapacityExceeded {
                    kind: SinkKind::File,
                    capacity,
                }
                .report()
            })
    }

    /// Registers a callback in the first free slot. Duplicate pairs are allowed
    /// and are invoked once per registration.
    pub fn add_callback<T: Send + Sync + 'static>(
        &mut self,
        func: Callback<T>,
        user_data: Arc<T>,
    ) -> Result<(), SinkError> {
        let capacity = self.callbacks.len();
        let Some(slot) = self.callbacks.iter_mut().find(|slot| slot.is_none()) else {
            return Err(SinkError::CapacityExceeded {
                kind: SinkKind::Callback,
                capacity,
            }
            .report());
        };
        *slot = Some(CallbackSink::new(func, user_data));
        Ok(())
    }

    /// Frees the first slot holding exactly this pair.
    pub fn remove_callback<T>(
        &mut self,
        func: Callback<T>,
        user_data: &Arc<T>,
    ) -> Result<(), SinkError> {
        let slot = self
            .callbacks
            .iter_mut()
            .find(|slot| {
                slot.as_ref()
                    .is_some_and(|sink| sink.matches(func, user_data))
            })
            .ok_or(SinkError::NotFound)?;
        *slot = None;
        Ok(())
    }

    /// Writes `message` to every open file, then runs every callback.
    pub fn dispatch(&mut self, color: Color, message: &str) {
        for file in self.files.iter_mut().flatten() {
            file.regular(color, message);
        }
        for callback in self.callbacks.iter().flatten() {
            callback.invoke(color, message);
        }
    }

    /// Closes every file and forgets every callback. Capacities are kept.
    pub fn clear(&mut self) {
        for slot in &mut self.files {
            if let Some(mut file) = slot.take() {
                file.flush();
            }
        }
        for slot in &mut self.callbacks {
            *slot = None;
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.iter().flatten().count()
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.iter().flatten().count()
    }

    pub fn file_capacity(&self) -> usize {
        self.files.len()
    }

    pub fn callback_capacity(&self) -> usize {
        self.callbacks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type Calls = Mutex<Vec<(Color, String)>>;

    fn record(color: Color, message: &str, calls: &Calls) {
        calls.lock().unwrap().push((color, message.to_string()));
    }

    fn record_twice(color: Color, message: &str, calls: &Calls) {
        record(color, message, calls);
        record(color, message, calls);
    }

    #[test]
    fn test_file_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = SinkRegistry::new(3, 0);
        for i in 0..3 {
            registry
                .add_file(dir.path().join(format!("{i}.log")), false)
                .unwrap();
        }
        let extra = dir.path().join("extra.log");
        let err = registry.add_file(&extra, false).unwrap_err();
        assert!(matches!(
            err,
            SinkError::CapacityExceeded {
                kind: SinkKind::File,
                capacity: 3
            }
        ));
        assert!(!extra.exists());
        assert_eq!(registry.file_count(), 3);
    }

    #[test]
    fn test_open_failure_leaves_slot_free() {
        let dir = tempfile::tempdir().unwrap();
        let mut registry = SinkRegistry::new(1, 0);
        let err = registry
            .add_file(dir.path().join("no/such/dir.log"), true)
            .unwrap_err();
        assert!(matches!(err, SinkError::OpenFailure { .. }));
        assert_eq!(registry.file_count(), 0);
        registry.add_file(dir.path().join("ok.log"), true).unwrap();
        assert_eq!(registry.file_count(), 1);
    }

    #[test]
    fn test_callback_capacity() {
        let calls = Arc::new(Calls::default());
        let mut registry = SinkRegistry::new(0, 4);
        for _ in 0..4 {
            registry.add_callback(record, calls.clone()).unwrap();
        }
        let err = registry.add_callback(record, calls.clone()).unwrap_err();
        assert!(matches!(
            err,
            SinkError::CapacityExceeded {
                kind: SinkKind::Callback,
                capacity: 4
            }
        ));
        assert_eq!(registry.callback_count(), 4);
    }

    #[test]
    fn test_dispatch_reaches_files_and_callbacks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let calls = Arc::new(Calls::default());
        let mut registry = SinkRegistry::new(2, 2);
        registry.add_file(&path, false).unwrap();
        registry.add_callback(record, calls.clone()).unwrap();
        registry.dispatch(Color::Yellow, "careful\n");
        registry.dispatch(Color::Default, "done\n");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "careful\ndone\n");
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                (Color::Yellow, "careful\n".to_string()),
                (Color::Default, "done\n".to_string())
            ]
        );
    }

    #[test]
    fn test_callback_identity_is_the_pair() {
        let first = Arc::new(Calls::default());
        let second = Arc::new(Calls::default());
        let mut registry = SinkRegistry::new(0, 4);
        registry.add_callback(record, first.clone()).unwrap();
        registry.add_callback(record_twice, second.clone()).unwrap();

        // Same function, different context.
        assert!(matches!(
            registry.remove_callback(record, &second),
            Err(SinkError::NotFound)
        ));
        // Same context, different function.
        assert!(matches!(
            registry.remove_callback(record_twice, &first),
            Err(SinkError::NotFound)
        ));
        assert_eq!(registry.callback_count(), 2);

        registry.remove_callback(record, &first).unwrap();
        registry.dispatch(Color::Blue, "m");
        assert!(first.lock().unwrap().is_empty());
        assert_eq!(second.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_remove_only_first_duplicate() {
        let calls = Arc::new(Calls::default());
        let mut registry = SinkRegistry::new(0, 3);
        registry.add_callback(record, calls.clone()).unwrap();
        registry.add_callback(record, calls.clone()).unwrap();
        registry.remove_callback(record, &calls).unwrap();
        assert_eq!(registry.callback_count(), 1);
        registry.dispatch(Color::Red, "x");
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_freed_slot_is_reused_first() {
        let order = Arc::new(Mutex::new(Vec::new()));
        fn tag(_: Color, message: &str, ctx: &(Arc<Mutex<Vec<String>>>, &'static str)) {
            ctx.0.lock().unwrap().push(format!("{}:{message}", ctx.1));
        }
        let mut registry = SinkRegistry::new(0, 2);
        let first = Arc::new((order.clone(), "first"));
        let second = Arc::new((order.clone(), "second"));
        let third = Arc::new((order.clone(), "third"));
        registry.add_callback(tag, first.clone()).unwrap();
        registry.add_callback(tag, second).unwrap();
        registry.remove_callback(tag, &first).unwrap();
        registry.add_callback(tag, third).unwrap();
        registry.dispatch(Color::Default, "m");
        assert_eq!(*order.lock().unwrap(), vec!["third:m", "second:m"]);
    }

    #[test]
    fn test_clear_closes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let calls = Arc::new(Calls::default());
        let mut registry = SinkRegistry::new(2, 2);
        registry.add_file(&path, false).unwrap();
        registry.add_callback(record, calls.clone()).unwrap();
        registry.clear();
        assert_eq!(registry.file_count(), 0);
        assert_eq!(registry.callback_count(), 0);
        assert_eq!(registry.file_capacity(), 2);
        assert_eq!(registry.callback_capacity(), 2);
        registry.dispatch(Color::Red, "after clear");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(Arc::strong_count(&calls), 1);
    }
}
