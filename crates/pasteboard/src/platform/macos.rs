//! NSPasteboard backend.

use crate::{Pasteboard, PasteboardError, PasteboardItem, PasteboardRepresentation};
use objc::rc::autoreleasepool;
use objc::runtime::{Class, Object, BOOL, NO};
use objc::{msg_send, sel, sel_impl};
use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_void};

type Id = *mut Object;

#[link(name = "AppKit", kind = "framework")]
extern "C" {}

/// The general pasteboard (`NSPasteboard.generalPasteboard`).
///
/// Reads go through `pasteboardItems` so multi-item contents (e.g. several
/// copied files) keep their grouping; writes build one `NSPasteboardItem`
/// per captured item.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacOSPasteboard;

impl MacOSPasteboard {
    pub fn new() -> Self {
        Self
    }
}

impl Pasteboard for MacOSPasteboard {
    fn read_items(&self) -> Result<Vec<PasteboardItem>, PasteboardError> {
        autoreleasepool(|| unsafe {
            let pasteboard = general_pasteboard()?;

            let items: Id = msg_send![pasteboard, pasteboardItems];
            if items.is_null() {
                return Ok(Vec::new());
            }

            let count: usize = msg_send![items, count];
            let mut result = Vec::with_capacity(count);

            for i in 0..count {
                let item: Id = msg_send![items, objectAtIndex: i];
                result.push(read_item(item));
            }

            Ok(result)
        })
    }

    fn write_items(&self, items: &[PasteboardItem]) -> Result<(), PasteboardError> {
        autoreleasepool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let item_class = class("NSPasteboardItem")?;
            let array_class = class("NSMutableArray")?;

            let objects: Id = msg_send![array_class, arrayWithCapacity: items.len()];

            for item in items.iter().filter(|item| !item.is_empty()) {
                let ns_item: Id = msg_send![item_class, alloc];
                let ns_item: Id = msg_send![ns_item, init];
                if ns_item.is_null() {
                    return Err(PasteboardError::Write(
                        "failed to allocate NSPasteboardItem".to_string(),
                    ));
                }

                let filled = fill_item(ns_item, item);
                if filled.is_ok() {
                    let _: () = msg_send![objects, addObject: ns_item];
                }
                // Either the array holds its own reference now, or the item
                // is discarded.
                let _: () = msg_send![ns_item, release];
                filled?;
            }

            let written: BOOL = msg_send![pasteboard, writeObjects: objects];
            if written == NO {
                return Err(PasteboardError::Write(
                    "NSPasteboard writeObjects: returned NO".to_string(),
                ));
            }
            Ok(())
        })
    }

    fn clear(&self) -> Result<(), PasteboardError> {
        autoreleasepool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let change_count: isize = msg_send![pasteboard, clearContents];
            tracing::trace!(change_count, "Cleared general pasteboard");
            Ok(())
        })
    }

    fn data_for_type(&self, type_id: &str) -> Result<Option<Vec<u8>>, PasteboardError> {
        autoreleasepool(|| unsafe {
            let pasteboard = general_pasteboard()?;
            let ns_type = ns_string(type_id)?;
            let data: Id = msg_send![pasteboard, dataForType: ns_type];
            Ok(ns_data_to_vec(data))
        })
    }
}

fn class(name: &str) -> Result<&'static Class, PasteboardError> {
    Class::get(name).ok_or_else(|| PasteboardError::Unavailable(format!("class {name} not found")))
}

unsafe fn general_pasteboard() -> Result<Id, PasteboardError> {
    let pasteboard: Id = msg_send![class("NSPasteboard")?, generalPasteboard];
    if pasteboard.is_null() {
        return Err(PasteboardError::Unavailable(
            "generalPasteboard returned nil".to_string(),
        ));
    }
    Ok(pasteboard)
}

/// Set every representation of `item` on a fresh `NSPasteboardItem`.
unsafe fn fill_item(ns_item: Id, item: &PasteboardItem) -> Result<(), PasteboardError> {
    for rep in &item.representations {
        let type_id = ns_string(&rep.type_id)?;
        let data = ns_data(&rep.bytes)?;
        let ok: BOOL = msg_send![ns_item, setData: data forType: type_id];
        if ok == NO {
            tracing::warn!(
                type_id = %rep.type_id,
                "NSPasteboardItem rejected representation"
            );
        }
    }
    Ok(())
}

/// Copy every representation of one `NSPasteboardItem`.
unsafe fn read_item(item: Id) -> PasteboardItem {
    let types: Id = msg_send![item, types];
    if types.is_null() {
        return PasteboardItem::default();
    }

    let count: usize = msg_send![types, count];
    let mut representations = Vec::with_capacity(count);

    for i in 0..count {
        let ns_type: Id = msg_send![types, objectAtIndex: i];
        let Some(type_id) = ns_string_to_string(ns_type) else {
            continue;
        };

        let data: Id = msg_send![item, dataForType: ns_type];
        match ns_data_to_vec(data) {
            Some(bytes) => representations.push(PasteboardRepresentation { type_id, bytes }),
            // Promised data the owner never delivered; nothing to preserve.
            None => tracing::debug!(%type_id, "Skipping representation without data"),
        }
    }

    PasteboardItem::new(representations)
}

unsafe fn ns_string(value: &str) -> Result<Id, PasteboardError> {
    let c_string = CString::new(value)
        .map_err(|_| PasteboardError::Write(format!("type id contains NUL: {value:?}")))?;
    let ns: Id = msg_send![class("NSString")?, stringWithUTF8String: c_string.as_ptr()];
    if ns.is_null() {
        return Err(PasteboardError::Write(format!("invalid type id: {value:?}")));
    }
    Ok(ns)
}

unsafe fn ns_string_to_string(ns: Id) -> Option<String> {
    if ns.is_null() {
        return None;
    }
    let c_str: *const c_char = msg_send![ns, UTF8String];
    if c_str.is_null() {
        return None;
    }
    CStr::from_ptr(c_str).to_str().ok().map(str::to_string)
}

unsafe fn ns_data(bytes: &[u8]) -> Result<Id, PasteboardError> {
    let data: Id = msg_send![
        class("NSData")?,
        dataWithBytes: bytes.as_ptr() as *const c_void
        length: bytes.len()
    ];
    if data.is_null() {
        return Err(PasteboardError::Write("failed to allocate NSData".to_string()));
    }
    Ok(data)
}

unsafe fn ns_data_to_vec(data: Id) -> Option<Vec<u8>> {
    if data.is_null() {
        return None;
    }
    let length: usize = msg_send![data, length];
    if length == 0 {
        return Some(Vec::new());
    }
    let bytes: *const u8 = msg_send![data, bytes];
    if bytes.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(bytes, length).to_vec())
}

#[cfg(all(test, feature = "system-tests"))]
mod tests {
    use super::*;
    use crate::PasteboardSnapshot;

    #[test]
    fn test_snapshot_round_trip_on_general_pasteboard() {
        // Modifies the real clipboard; restores it at the end.
        let pasteboard = MacOSPasteboard::new();
        let original = PasteboardSnapshot::capture(&pasteboard).unwrap();

        let item = PasteboardItem::new(vec![
            PasteboardRepresentation::new("public.utf8-plain-text", b"kami".to_vec()),
            PasteboardRepresentation::new("com.example.kami.test", vec![0, 1, 2, 255]),
        ]);
        pasteboard.clear().unwrap();
        pasteboard.write_items(&[item]).unwrap();

        assert_eq!(
            pasteboard.data_for_type("com.example.kami.test").unwrap(),
            Some(vec![0, 1, 2, 255])
        );

        original.restore(&pasteboard).unwrap();
    }
}
