//! macOS-specific functionality for input emulation.

use core_foundation::base::TCFType;
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::string::CFString;
use core_graphics::event::{CGEvent, CGEventFlags, CGKeyCode};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};

use crate::error::InputError;

/// Virtual key code of "c" on ANSI layouts.
const KEY_C: CGKeyCode = 8;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
}

/// Check if the application has accessibility permissions on macOS.
pub fn has_accessibility_access() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Show the system accessibility prompt.
///
/// Uses `AXIsProcessTrustedWithOptions` with `AXTrustedCheckOptionPrompt`, the
/// same dialog the system shows for any app requesting the permission.
pub fn prompt_accessibility_access() {
    let key = CFString::from_static_string("AXTrustedCheckOptionPrompt");
    let options =
        CFDictionary::from_CFType_pairs(&[(key.as_CFType(), CFBoolean::true_value().as_CFType())]);

    let trusted = unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) };
    tracing::info!(trusted, "Requested accessibility permission");
}

/// Post Cmd+C (key down, then key up) to a single process.
pub fn post_copy_to_pid(pid: i32) -> Result<(), InputError> {
    let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|_| InputError::EventCreation("CGEventSource".to_string()))?;

    let key_down = CGEvent::new_keyboard_event(source.clone(), KEY_C, true)
        .map_err(|_| InputError::EventCreation("key down".to_string()))?;
    key_down.set_flags(CGEventFlags::CGEventFlagCommand);

    let key_up = CGEvent::new_keyboard_event(source, KEY_C, false)
        .map_err(|_| InputError::EventCreation("key up".to_string()))?;
    key_up.set_flags(CGEventFlags::CGEventFlagCommand);

    key_down.post_to_pid(pid);
    key_up.post_to_pid(pid);

    tracing::debug!(pid, "Posted Cmd+C to process");
    Ok(())
}

#[cfg(all(test, feature = "system-tests"))]
mod tests {
    use super::*;

    #[test]
    fn test_has_accessibility_access() {
        // The actual result depends on system permissions
        let first = has_accessibility_access();
        let second = has_accessibility_access();
        assert_eq!(first, second);
    }
}
