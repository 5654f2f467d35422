use core_foundation::array::{CFArray, CFArrayRef};
use core_foundation::base::{CFType, CFTypeRef, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::{CFDictionary, CFDictionaryRef};
use core_foundation::string::{CFString, CFStringRef};
use core_graphics::geometry::{CGPoint, CGSize};
use fusuma_layout::Rect;
use std::ffi::c_void;
use std::ptr;
use thiserror::Error;

type AXUIElementRef = CFTypeRef;

#[link(name = "ApplicationServices", kind = "framework")]
extern "C" {
    fn AXUIElementCreateSystemWide() -> AXUIElementRef;
    fn AXUIElementCreateApplication(pid: i32) -> AXUIElementRef;
    fn AXUIElementCopyAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: *mut CFTypeRef,
    ) -> i32;
    fn AXUIElementSetAttributeValue(
        element: AXUIElementRef,
        attribute: CFStringRef,
        value: CFTypeRef,
    ) -> i32;
    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
    fn AXValueCreate(value_type: u32, value: *const c_void) -> CFTypeRef;
    fn AXValueGetValue(value: CFTypeRef, value_type: u32, value_out: *mut c_void) -> bool;
    fn _AXUIElementGetWindow(element: AXUIElementRef, window_id: *mut u32) -> i32;
}

const AX_VALUE_TYPE_CGPOINT: u32 = 1;
const AX_VALUE_TYPE_CGSIZE: u32 = 2;

const AX_ERROR_SUCCESS: i32 = 0;
const AX_ERROR_API_DISABLED: i32 = -25211;
const AX_ERROR_NO_VALUE: i32 = -25212;

const FOCUSED_APPLICATION: &str = "AXFocusedApplication";
const FOCUSED_WINDOW: &str = "AXFocusedWindow";
const POSITION: &str = "AXPosition";
const SIZE: &str = "AXSize";
const WINDOWS: &str = "AXWindows";

#[derive(Debug, Error)]
pub enum AxError {
    #[error("accessibility access is disabled")]
    ApiDisabled,
    #[error("{0} has no value")]
    NoValue(&'static str),
    #[error("{op} failed with AX error {code}")]
    Call { op: &'static str, code: i32 },
    #[error("failed to convert {0}")]
    Conversion(&'static str),
}

fn check(op: &'static str, code: i32) -> Result<(), AxError> {
    match code {
        AX_ERROR_SUCCESS => Ok(()),
        AX_ERROR_API_DISABLED => Err(AxError::ApiDisabled),
        AX_ERROR_NO_VALUE => Err(AxError::NoValue(op)),
        code => Err(AxError::Call { op, code }),
    }
}

pub fn is_trusted() -> bool {
    unsafe { AXIsProcessTrusted() }
}

/// Same check, but asks the system to show the permission prompt.
pub fn is_trusted_with_prompt() -> bool {
    let key = CFString::new("AXTrustedCheckOptionPrompt");
    let options = CFDictionary::from_CFType_pairs(&[(
        key.as_CFType(),
        CFBoolean::true_value().as_CFType(),
    )]);
    unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) }
}

/// An owned `AXUIElementRef`, released on drop.
pub struct AxElement(CFType);

impl AxElement {
    /// Takes ownership of a +1 reference.
    fn from_create(raw: AXUIElementRef) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        Some(Self(unsafe { CFType::wrap_under_create_rule(raw) }))
    }

    pub fn system_wide() -> Option<Self> {
        Self::from_create(unsafe { AXUIElementCreateSystemWide() })
    }

    pub fn application(pid: i32) -> Option<Self> {
        Self::from_create(unsafe { AXUIElementCreateApplication(pid) })
    }

    fn raw(&self) -> AXUIElementRef {
        self.0.as_CFTypeRef()
    }

    fn copy_attribute(&self, attribute: &'static str) -> Result<CFType, AxError> {
        let name = CFString::new(attribute);
        let mut value: CFTypeRef = ptr::null();
        let code = unsafe {
            AXUIElementCopyAttributeValue(self.raw(), name.as_concrete_TypeRef(), &mut value)
        };
        check(attribute, code)?;
        if value.is_null() {
            return Err(AxError::NoValue(attribute));
        }
        Ok(unsafe { CFType::wrap_under_create_rule(value) })
    }

    fn set_attribute(&self, attribute: &'static str, value: &CFType) -> Result<(), AxError> {
        let name = CFString::new(attribute);
        let code = unsafe {
            AXUIElementSetAttributeValue(
                self.raw(),
                name.as_concrete_TypeRef(),
                value.as_CFTypeRef(),
            )
        };
        check(attribute, code)
    }

    fn copy_element(&self, attribute: &'static str) -> Result<AxElement, AxError> {
        let value = self.copy_attribute(attribute)?;
        Ok(AxElement(value))
    }

    pub fn focused_application(&self) -> Result<AxElement, AxError> {
        self.copy_element(FOCUSED_APPLICATION)
    }

    pub fn focused_window(&self) -> Result<AxElement, AxError> {
        self.copy_element(FOCUSED_WINDOW)
    }

    /// The window server id, when this element is a window.
    pub fn window_id(&self) -> Option<u32> {
        let mut id = 0u32;
        let code = unsafe { _AXUIElementGetWindow(self.raw(), &mut id) };
        (code == AX_ERROR_SUCCESS && id != 0).then_some(id)
    }

    pub fn window_count(&self) -> Result<usize, AxError> {
        let value = self.copy_attribute(WINDOWS)?;
        let windows: CFArray<CFType> =
            unsafe { CFArray::wrap_under_get_rule(value.as_CFTypeRef() as CFArrayRef) };
        Ok(windows.len() as usize)
    }

    fn position(&self) -> Result<CGPoint, AxError> {
        let value = self.copy_attribute(POSITION)?;
        let mut point = CGPoint::new(0.0, 0.0);
        let ok = unsafe {
            AXValueGetValue(
                value.as_CFTypeRef(),
                AX_VALUE_TYPE_CGPOINT,
                &mut point as *mut CGPoint as *mut c_void,
            )
        };
        if ok {
            Ok(point)
        } else {
            Err(AxError::Conversion(POSITION))
        }
    }

    fn size(&self) -> Result<CGSize, AxError> {
        let value = self.copy_attribute(SIZE)?;
        let mut size = CGSize::new(0.0, 0.0);
        let ok = unsafe {
            AXValueGetValue(
                value.as_CFTypeRef(),
                AX_VALUE_TYPE_CGSIZE,
                &mut size as *mut CGSize as *mut c_void,
            )
        };
        if ok {
            Ok(size)
        } else {
            Err(AxError::Conversion(SIZE))
        }
    }

    pub fn frame(&self) -> Result<Rect, AxError> {
        let origin = self.position()?;
        let size = self.size()?;
        Ok(Rect::new(origin.x, origin.y, size.width, size.height))
    }

    fn set_position(&self, x: f64, y: f64) -> Result<(), AxError> {
        let point = CGPoint::new(x, y);
        let raw = unsafe {
            AXValueCreate(
                AX_VALUE_TYPE_CGPOINT,
                &point as *const CGPoint as *const c_void,
            )
        };
        if raw.is_null() {
            return Err(AxError::Conversion(POSITION));
        }
        let value = unsafe { CFType::wrap_under_create_rule(raw) };
        self.set_attribute(POSITION, &value)
    }

    fn set_size(&self, width: f64, height: f64) -> Result<(), AxError> {
        let size = CGSize::new(width, height);
        let raw = unsafe {
            AXValueCreate(
                AX_VALUE_TYPE_CGSIZE,
                &size as *const CGSize as *const c_void,
            )
        };
        if raw.is_null() {
            return Err(AxError::Conversion(SIZE));
        }
        let value = unsafe { CFType::wrap_under_create_rule(raw) };
        self.set_attribute(SIZE, &value)
    }

    /// Size is applied again after the move; the move can clamp it.
    pub fn set_frame(&self, frame: &Rect) -> Result<(), AxError> {
        self.set_size(frame.width, frame.height)?;
        self.set_position(frame.x, frame.y)?;
        self.set_size(frame.width, frame.height)
    }
}
