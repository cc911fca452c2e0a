//! C ABI over [`DynamicArray`].
//!
//! Arrays are handed out as opaque heap pointers by `arraylist_init` and must
//! be released with `arraylist_del`. Fallible calls return [`STATUS_OK`] or
//! [`STATUS_ERR`]; searches return [`NOT_FOUND`] on a miss.

use dyn_array::{DynamicArray, SortOrder};
use libc::{c_int, size_t, ssize_t};
use std::ptr;
use tracing::warn;

pub const STATUS_OK: c_int = 0;
pub const STATUS_ERR: c_int = -1;
pub const NOT_FOUND: ssize_t = -1;

fn status(op: &str, res: dyn_array::Result<()>) -> c_int {
    match res {
        Ok(()) => STATUS_OK,
        Err(e) => {
            warn!(op, error = %e, "arraylist call rejected");
            STATUS_ERR
        }
    }
}

fn null_handle(op: &str) -> c_int {
    warn!(op, "null array handle");
    STATUS_ERR
}

fn found(index: Option<usize>) -> ssize_t {
    index.map_or(NOT_FOUND, |i| i as ssize_t)
}

/// Create a new array with the default capacity. Returns null if the
/// allocation fails.
#[unsafe(no_mangle)]
pub extern "C" fn arraylist_init() -> *mut DynamicArray {
    match DynamicArray::new() {
        Ok(arr) => Box::into_raw(Box::new(arr)),
        Err(e) => {
            warn!(error = %e, "arraylist_init failed");
            ptr::null_mut()
        }
    }
}

/// Release an array created by `arraylist_init`. Null is ignored.
///
/// # Safety
/// `al` must be null or a pointer returned by `arraylist_init` that has not
/// been released yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_del(al: *mut DynamicArray) {
    if !al.is_null() {
        unsafe {
            drop(Box::from_raw(al));
        }
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_size(al: *const DynamicArray) -> size_t {
    unsafe { al.as_ref() }.map_or(0, |arr| arr.len())
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_capacity(al: *const DynamicArray) -> size_t {
    unsafe { al.as_ref() }.map_or(0, |arr| arr.capacity())
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_is_empty(al: *const DynamicArray) -> bool {
    unsafe { al.as_ref() }.is_none_or(|arr| arr.is_empty())
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_is_full(al: *const DynamicArray) -> bool {
    unsafe { al.as_ref() }.is_some_and(|arr| arr.is_full())
}

/// Read `pos` into `*out`.
///
/// # Safety
/// `al` must be null or a live array handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_get(
    al: *const DynamicArray,
    pos: size_t,
    out: *mut c_int,
) -> c_int {
    let (Some(arr), false) = (unsafe { al.as_ref() }, out.is_null()) else {
        return null_handle("arraylist_get");
    };
    match arr.get(pos) {
        Ok(val) => {
            unsafe { *out = val };
            STATUS_OK
        }
        Err(e) => status("arraylist_get", Err(e)),
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_set(al: *mut DynamicArray, pos: size_t, val: c_int) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_set", arr.set(pos, val)),
        None => null_handle("arraylist_set"),
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_push_back(al: *mut DynamicArray, val: c_int) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_push_back", arr.push_back(val)),
        None => null_handle("arraylist_push_back"),
    }
}

/// Remove the last element and write it to `*out`.
///
/// # Safety
/// `al` must be null or a live array handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_pop(al: *mut DynamicArray, out: *mut c_int) -> c_int {
    let (Some(arr), false) = (unsafe { al.as_mut() }, out.is_null()) else {
        return null_handle("arraylist_pop");
    };
    match arr.pop() {
        Ok(val) => {
            unsafe { *out = val };
            STATUS_OK
        }
        Err(e) => status("arraylist_pop", Err(e)),
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_sort(al: *mut DynamicArray, ascend: bool) {
    if let Some(arr) = unsafe { al.as_mut() } {
        arr.sort(SortOrder::from(ascend));
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_print(al: *const DynamicArray) {
    if let Some(arr) = unsafe { al.as_ref() } {
        arr.print();
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_clear(al: *mut DynamicArray) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_clear", arr.clear()),
        None => null_handle("arraylist_clear"),
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_resize(al: *mut DynamicArray, count: size_t) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_resize", arr.resize(count)),
        None => null_handle("arraylist_resize"),
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_reverse(al: *mut DynamicArray) {
    if let Some(arr) = unsafe { al.as_mut() } {
        arr.reverse();
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_insert(al: *mut DynamicArray, pos: size_t, val: c_int) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_insert", arr.insert(pos, val)),
        None => null_handle("arraylist_insert"),
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_erase(al: *mut DynamicArray, pos: size_t) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_erase", arr.erase(pos).map(|_| ())),
        None => null_handle("arraylist_erase"),
    }
}

/// Append every element of `src` to `dest`. `dest` and `src` may be the
/// same handle, in which case the array is doubled.
///
/// # Safety
/// Both pointers must be null or live array handles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_concat(dest: *mut DynamicArray, src: *const DynamicArray) -> c_int {
    if dest.is_null() || src.is_null() {
        return null_handle("arraylist_concat");
    }
    if ptr::eq(dest, src) {
        let arr = unsafe { &mut *dest };
        let copy = arr.clone();
        return status("arraylist_concat", arr.concat(&copy));
    }
    let (arr, other) = unsafe { (&mut *dest, &*src) };
    status("arraylist_concat", arr.concat(other))
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_shrink_to_fit(al: *mut DynamicArray) -> c_int {
    match unsafe { al.as_mut() } {
        Some(arr) => status("arraylist_shrink_to_fit", arr.shrink_to_fit()),
        None => null_handle("arraylist_shrink_to_fit"),
    }
}

/// Erase the first element equal to `val`; a miss is not an error.
///
/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_remove(al: *mut DynamicArray, val: c_int) {
    if let Some(arr) = unsafe { al.as_mut() } {
        arr.remove(val);
    }
}

/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_lsearch(al: *const DynamicArray, val: c_int) -> ssize_t {
    found(unsafe { al.as_ref() }.and_then(|arr| arr.lsearch(val)))
}

/// The array must be sorted ascending.
///
/// # Safety
/// `al` must be null or a live array handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_bsearch(al: *const DynamicArray, val: c_int) -> ssize_t {
    found(unsafe { al.as_ref() }.and_then(|arr| arr.bsearch(val)))
}

/// # Safety
/// Both pointers must be null or live array handles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn arraylist_equals(al1: *const DynamicArray, al2: *const DynamicArray) -> bool {
    match unsafe { (al1.as_ref(), al2.as_ref()) } {
        (Some(a), Some(b)) => a.equals(b),
        _ => false,
    }
}
