use std::{
    fs::File,
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{Color, color::ColorRenderer, error::SinkError};

/// Destination for rendered messages. Write failures are swallowed.
pub trait LogWriter: Send {
    fn regular(&mut self, color: Color, line: &str);
    fn flush(&mut self);
}

/// An open log file owned by the sink registry.
#[derive(Debug)]
pub struct LogFile {
    path: PathBuf,
    file: File,
}

impl LogFile {
    /// Opens `path`, appending to existing content or truncating it.
    pub fn open<P: AsRef<Path>>(path: P, append: bool) -> Result<Self, SinkError> {
        let path = path.as_ref();
        let file = File::options()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|source| SinkError::OpenFailure {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogWriter for LogFile {
    /// Files always receive the uncolored bytes.
    fn regular(&mut self, _color: Color, line: &str) {
        self.file.write_all(line.as_bytes()).ok();
    }

    fn flush(&mut self) {
        self.file.flush().ok();
    }
}

/// Console output driven through a `ColorRenderer`.
pub struct LogConsole {
    out: Box<dyn Write + Send>,
    renderer: Box<dyn ColorRenderer>,
}

impl LogConsole {
    pub fn new(out: Box<dyn Write + Send>, renderer: Box<dyn ColorRenderer>) -> Self {
        Self { out, renderer }
    }

    pub fn stdout(renderer: Box<dyn ColorRenderer>) -> Self {
        Self::new(Box::new(io::stdout()), renderer)
    }

    pub fn is_colored(&self) -> bool {
        self.renderer.is_colored()
    }
}

impl LogWriter for LogConsole {
    fn regular(&mut self, color: Color, line: &str) {
        self.renderer.render(&mut *self.out, color, line).ok();
        self.out.flush().ok();
    }

    fn flush(&mut self) {
        self.out.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::AnsiRenderer;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_log_file_truncate_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, "stale\n").unwrap();

        let mut file = LogFile::open(&path, false).unwrap();
        file.regular(Color::Red, "first\n");
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");

        let mut file = LogFile::open(&path, true).unwrap();
        file.regular(Color::Default, "second\n");
        assert_eq!(file.path(), path.as_path());
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_log_file_open_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.log");
        let err = LogFile::open(&path, true).unwrap_err();
        assert!(matches!(err, SinkError::OpenFailure { path: p, .. } if p == path));
    }

    #[test]
    fn test_log_console_uses_renderer() {
        let buf = SharedBuf::default();
        let mut console = LogConsole::new(Box::new(buf.clone()), Box::new(AnsiRenderer));
        console.regular(Color::Green, "ok");
        console.regular(Color::Default, "-");
        assert!(console.is_colored());
        assert_eq!(
            String::from_utf8(buf.0.lock().unwrap().clone()).unwrap(),
            "\x1B[32mok\x1B[0m-"
        );
    }
}
