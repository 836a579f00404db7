//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use crate::device::handle::{Initialized, Reader, Uninitialized};
use crate::transport::mock::{MockTransport, Reply};
use crate::transport::traits::Transport;
use crate::Result;

/// Build a Reader<Initialized> backed by a MockTransport pre-seeded with
/// the given scripted replies.
#[doc(hidden)]
pub fn initialized_mock_reader(replies: Vec<Reply>) -> Reader<Initialized> {
    let mut mock = MockTransport::new();
    for reply in replies {
        mock.push_reply(reply);
    }
    let boxed: Box<dyn Transport> = Box::new(mock);
    Reader::<Uninitialized>::new_with_transport(boxed)
        .initialize()
        .expect("mock initialization cannot fail")
}

/// Transport wrapper that delegates into a shared MockTransport so tests
/// can keep inspecting the mock after the Reader takes ownership.
#[doc(hidden)]
pub struct SharedTransport {
    inner: Rc<RefCell<MockTransport>>,
}

impl SharedTransport {
    pub fn new(inner: Rc<RefCell<MockTransport>>) -> Self {
        Self { inner }
    }
}

impl Transport for SharedTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.inner.borrow_mut().write(data)
    }

    fn write_read(&mut self, addr_frame: u8) -> Result<u8> {
        self.inner.borrow_mut().write_read(addr_frame)
    }

    fn reset(&mut self) -> Result<()> {
        self.inner.borrow_mut().reset()
    }
}

/// Like [`initialized_mock_reader`], but also hands back the shared mock
/// for post-hoc assertions (sent frames, poll counts).
#[doc(hidden)]
pub fn shared_mock_reader(replies: Vec<Reply>) -> (Rc<RefCell<MockTransport>>, Reader<Initialized>) {
    let mut mock = MockTransport::new();
    for reply in replies {
        mock.push_reply(reply);
    }
    let shared = Rc::new(RefCell::new(mock));
    let boxed: Box<dyn Transport> = Box::new(SharedTransport::new(shared.clone()));
    let reader = Reader::<Uninitialized>::new_with_transport(boxed)
        .initialize()
        .expect("mock initialization cannot fail");
    (shared, reader)
}

/// 16-bit ATQA answer to a REQA/WUPA probe.
#[doc(hidden)]
pub fn atqa_reply() -> Reply {
    Reply::Bytes {
        data: vec![0x04, 0x00],
        valid_bits: 0,
    }
}

/// ANTICOLL answer carrying four serial bytes plus the XOR check byte.
#[doc(hidden)]
pub fn anticoll_reply(part: [u8; 4]) -> Reply {
    let check = part.iter().fold(0u8, |acc, &b| acc ^ b);
    let mut data = part.to_vec();
    data.push(check);
    Reply::Bytes {
        data,
        valid_bits: 0,
    }
}

/// 24-bit SAK answer to a SELECT frame.
#[doc(hidden)]
pub fn sak_reply(sak: u8) -> Reply {
    Reply::Bytes {
        data: vec![sak, 0x00, 0x00],
        valid_bits: 0,
    }
}

/// One full cascade level: ANTICOLL answer then SELECT acknowledgement.
#[doc(hidden)]
pub fn cascade_level(part: [u8; 4]) -> Vec<Reply> {
    vec![anticoll_reply(part), sak_reply(0x08)]
}

/// GET_VERSION answer with the given storage-variant byte.
#[doc(hidden)]
pub fn version_reply(storage: u8) -> Reply {
    Reply::Bytes {
        data: vec![0x00, 0x04, 0x04, 0x02, 0x01, 0x00, storage, 0x03],
        valid_bits: 0,
    }
}

/// Replies for a complete `select()` of a 4-byte-UID sector card:
/// ATQA, one cascade level, and a silent version query.
#[doc(hidden)]
pub fn sector_card_select(uid: [u8; 4]) -> Vec<Reply> {
    let mut replies = vec![atqa_reply()];
    replies.extend(cascade_level(uid));
    replies.push(Reply::Timer);
    replies
}

/// Replies for a complete `select()` of a 7-byte-UID page tag with the
/// given storage byte.
#[doc(hidden)]
pub fn page_tag_select(uid: [u8; 7], storage: u8) -> Vec<Reply> {
    let mut replies = vec![atqa_reply()];
    replies.extend(cascade_level([0x88, uid[0], uid[1], uid[2]]));
    replies.extend(cascade_level([uid[3], uid[4], uid[5], uid[6]]));
    replies.push(version_reply(storage));
    replies
}
