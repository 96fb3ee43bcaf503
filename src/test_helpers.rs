use core::convert::Infallible;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_io::{ErrorType, Read, ReadReady, Write};

use crate::client::Device;
use crate::config::Config;

/// Reply consisting of only the final result code
pub const OK: &str = "\r\nOK\r\n";

#[derive(Debug, Default)]
struct Inner {
    script: VecDeque<(String, String)>,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    line: Vec<u8>,
    echo: bool,
}

/// Scripted modem. Each completed command line must match the next expected
/// command, whose reply is then queued for reading.
#[derive(Debug, Clone, Default)]
pub struct MockSerial(Rc<RefCell<Inner>>);

impl MockSerial {
    pub fn new() -> Self {
        init_logger();
        Self::default()
    }

    pub fn expect(self, cmd: &str, reply: &str) -> Self {
        self.0
            .borrow_mut()
            .script
            .push_back((cmd.to_string(), reply.to_string()));
        self
    }

    /// Echo each command back before its reply, like the module does after
    /// `ATE1`.
    pub fn with_echo(self) -> Self {
        self.0.borrow_mut().echo = true;
        self
    }

    /// Queue unsolicited bytes.
    pub fn push_rx(&self, data: &str) {
        self.0.borrow_mut().rx.extend(data.bytes());
    }

    /// Everything written so far.
    pub fn written(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow().tx).into_owned()
    }

    /// All expected commands were sent and every reply was read.
    pub fn is_done(&self) -> bool {
        let inner = self.0.borrow();
        inner.script.is_empty() && inner.rx.is_empty()
    }
}

impl ErrorType for MockSerial {
    type Error = Infallible;
}

impl Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let mut inner = self.0.borrow_mut();
        let n = buf.len().min(inner.rx.len());
        for (dst, src) in buf.iter_mut().zip(inner.rx.drain(..n)) {
            *dst = src;
        }
        Ok(n)
    }
}

impl ReadReady for MockSerial {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.0.borrow().rx.is_empty())
    }
}

impl Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        let inner = &mut *self.0.borrow_mut();
        for &b in buf {
            inner.tx.push(b);
            if b != b'\n' {
                inner.line.push(b);
                continue;
            }

            let line = String::from_utf8(core::mem::take(&mut inner.line)).unwrap();
            let line = line.trim_end_matches('\r');
            let Some((cmd, reply)) = inner.script.pop_front() else {
                panic!("Unexpected command {:?}", line);
            };
            assert_eq!(line, cmd);

            if inner.echo {
                inner.rx.extend(line.bytes());
                inner.rx.extend(b"\r\n");
            }
            inner.rx.extend(reply.bytes());
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn device(serial: MockSerial) -> Device<MockSerial> {
    device_with(serial, Config::default())
}

pub fn device_with(serial: MockSerial, config: Config) -> Device<MockSerial> {
    Device::new(serial, config)
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
