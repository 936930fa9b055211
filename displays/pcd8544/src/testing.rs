//! Recording transport for unit tests

use core::convert::Infallible;

use heapless::Vec;

use crate::transport::{Tag, Transport};

/// Transport mock that logs every byte it is given
pub struct MockTransport {
    pub sent: Vec<(u8, Tag), 1024>,
    pub resets: u8,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            resets: 0,
        }
    }

    pub fn commands(&self) -> impl Iterator<Item = u8> + '_ {
        self.sent
            .iter()
            .filter(|(_, tag)| *tag == Tag::Command)
            .map(|(b, _)| *b)
    }

    pub fn data(&self) -> impl Iterator<Item = u8> + '_ {
        self.sent
            .iter()
            .filter(|(_, tag)| *tag == Tag::Data)
            .map(|(b, _)| *b)
    }

    pub fn data_len(&self) -> usize {
        self.data().count()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
    }
}

impl Transport for MockTransport {
    type Error = Infallible;

    fn send(&mut self, byte: u8, tag: Tag) -> Result<(), Self::Error> {
        self.sent.push((byte, tag)).expect("mock transport log full");
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.resets += 1;
        Ok(())
    }
}

/// Transport that fails once its byte budget runs out
pub struct FlakyTransport {
    pub budget: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkDown;

impl Transport for FlakyTransport {
    type Error = LinkDown;

    fn send(&mut self, _byte: u8, _tag: Tag) -> Result<(), Self::Error> {
        if self.budget == 0 {
            return Err(LinkDown);
        }
        self.budget -= 1;
        Ok(())
    }

    fn reset(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
