#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use rox::{Lox, RunReport};

/// In-memory `print` sink that the test can still read after handing a
/// clone to the interpreter.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session with captured output.
pub fn session() -> (Lox, SharedBuffer) {
    let buffer = SharedBuffer::default();
    (Lox::with_output(Box::new(buffer.clone())), buffer)
}

/// Run one program and return what it printed plus the report.
pub fn run(source: &str) -> (String, RunReport) {
    let (mut lox, buffer) = session();
    let report = lox.run(source);
    (buffer.contents(), report)
}

/// Run a program that must succeed and return its output lines.
pub fn output_of(source: &str) -> Vec<String> {
    let (out, report) = run(source);
    assert!(
        report.exit_code().is_none(),
        "program failed: {:?}",
        report.errors().map(|e| e.to_string()).collect::<Vec<_>>()
    );
    out.lines().map(str::to_string).collect()
}
