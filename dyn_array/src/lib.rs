//! 基于原始缓冲区的整数动态数组。
//!
//! `DynamicArray` 自己管理一块连续的 `i32` 存储：满了就按 `GROW_FACTOR`
//! 倍增，`clear` / `shrink_to_fit` / `resize` 时重新分配变小。
//! 所有公开操作都做边界检查并返回 [`Result`]，不做检查的快速路径
//! 只以 `unsafe fn` 的形式提供。

use std::alloc::{alloc, dealloc, handle_alloc_error, realloc, Layout};
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use thiserror::Error;
use tracing::{debug, trace};

/// 初始化时分配的槽位数。
pub const INIT_CAPACITY: usize = 4;

/// 容量不足时的倍增系数。
pub const GROW_FACTOR: usize = 2;

#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArrayError {
    #[error("allocation of {capacity} slots failed")]
    AllocFailed { capacity: usize },
    #[error("capacity overflow")]
    CapacityOverflow,
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("array is empty")]
    Empty,
}

pub type Result<T> = std::result::Result<T, ArrayError>;

/// 选择排序的方向。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<bool> for SortOrder {
    fn from(ascending: bool) -> Self {
        if ascending {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        }
    }
}

/// 整数动态数组。
///
/// 不变量：`len <= cap`；`[0, len)` 内的槽位都已写入；`[len, cap)` 的内容无意义。
/// 缓冲区在任何可变操作之后都可能被搬走，对外只通过借用暴露。
pub struct DynamicArray {
    ptr: NonNull<i32>,
    cap: usize,
    len: usize,
}

// SAFETY: 缓冲区由 DynamicArray 独占，元素是普通整数
unsafe impl Send for DynamicArray {}
// SAFETY: 共享引用只能读取，写入需要 &mut
unsafe impl Sync for DynamicArray {}

impl DynamicArray {
    /// 创建空数组并分配 `INIT_CAPACITY` 个槽位。
    pub fn new() -> Result<Self> {
        Self::with_capacity(INIT_CAPACITY)
    }

    /// 创建具有指定初始容量的动态数组，容量至少为 1。
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        let mut array = Self::unallocated();
        array.do_realloc(capacity.max(1))?;
        Ok(array)
    }

    /// 复制一个切片，容量取 `max(len, INIT_CAPACITY)`。
    pub fn from_slice(values: &[i32]) -> Result<Self> {
        let mut array = Self::with_capacity(values.len().max(INIT_CAPACITY))?;
        unsafe {
            // SAFETY: 容量至少为 values.len()，两块内存互不重叠
            ptr::copy_nonoverlapping(values.as_ptr(), array.ptr.as_ptr(), values.len());
        }
        array.len = values.len();
        Ok(array)
    }

    fn unallocated() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
        }
    }

    /// 获取当前元素数量
    pub fn len(&self) -> usize {
        self.len
    }

    /// `len` 的别名。
    pub fn size(&self) -> usize {
        self.len
    }

    /// 获取当前容量
    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.cap
    }

    pub fn as_slice(&self) -> &[i32] {
        // SAFETY: [0, len) 都已初始化；cap 为 0 时指针是 dangling 且 len 为 0
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        // SAFETY: 同 as_slice，且 &mut self 保证独占
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// 读取 `pos` 处的元素。
    pub fn get(&self, pos: usize) -> Result<i32> {
        self.as_slice()
            .get(pos)
            .copied()
            .ok_or(ArrayError::IndexOutOfRange {
                index: pos,
                len: self.len,
            })
    }

    /// 覆盖 `pos` 处的元素。
    pub fn set(&mut self, pos: usize, val: i32) -> Result<()> {
        let len = self.len;
        let slot = self
            .as_mut_slice()
            .get_mut(pos)
            .ok_or(ArrayError::IndexOutOfRange { index: pos, len })?;
        *slot = val;
        Ok(())
    }

    /// 不做边界检查的读取，只有 debug 构建里有断言。
    ///
    /// # Safety
    /// 调用方必须保证 `pos < self.len()`。
    pub unsafe fn get_unchecked(&self, pos: usize) -> i32 {
        debug_assert!(pos < self.len, "Index out of bounds");
        unsafe { *self.ptr.as_ptr().add(pos) }
    }

    /// 不做边界检查的写入。
    ///
    /// # Safety
    /// 调用方必须保证 `pos < self.len()`。
    pub unsafe fn set_unchecked(&mut self, pos: usize, val: i32) {
        debug_assert!(pos < self.len, "Index out of bounds");
        unsafe { *self.ptr.as_ptr().add(pos) = val }
    }

    /// 在末尾添加元素，满了先倍增容量。
    pub fn push_back(&mut self, val: i32) -> Result<()> {
        if self.is_full() {
            self.grow_for(1)?;
        }

        unsafe {
            // SAFETY: 上面已确保 len < cap
            ptr::write(self.ptr.as_ptr().add(self.len), val);
        }
        // 只有在写入成功后才增加 len
        self.len += 1;
        Ok(())
    }

    /// 弹出末尾元素，也就是 `len - 1` 处的值。
    pub fn pop(&mut self) -> Result<i32> {
        if self.len == 0 {
            return Err(ArrayError::Empty);
        }
        self.len -= 1;
        // SAFETY: len 已减 1，该位置是有效的已初始化元素
        Ok(unsafe { ptr::read(self.ptr.as_ptr().add(self.len)) })
    }

    /// 在 `pos` 处插入元素，`pos == len` 等价于 `push_back`。
    pub fn insert(&mut self, pos: usize, val: i32) -> Result<()> {
        if pos > self.len {
            return Err(ArrayError::IndexOutOfRange {
                index: pos,
                len: self.len,
            });
        }
        if self.is_full() {
            self.grow_for(1)?;
        }

        unsafe {
            let p = self.ptr.as_ptr().add(pos);
            // 将 pos 之后的元素向后移动一位，ptr::copy 允许重叠，pos 为 0 时也没有下溢
            ptr::copy(p, p.add(1), self.len - pos);
            ptr::write(p, val);
        }
        self.len += 1;
        Ok(())
    }

    /// 移除并返回 `pos` 处的元素。
    pub fn erase(&mut self, pos: usize) -> Result<i32> {
        if pos >= self.len {
            return Err(ArrayError::IndexOutOfRange {
                index: pos,
                len: self.len,
            });
        }
        unsafe {
            let p = self.ptr.as_ptr().add(pos);
            let removed = ptr::read(p);
            // 将 pos 之后的元素向前移动一位
            ptr::copy(p.add(1), p, self.len - pos - 1);
            self.len -= 1;
            Ok(removed)
        }
    }

    /// 删除第一个等于 `val` 的元素，返回它原来的下标；找不到时什么也不做。
    pub fn remove(&mut self, val: i32) -> Option<usize> {
        let pos = self.lsearch(val)?;
        self.erase(pos).ok().map(|_| pos)
    }

    /// 线性查找第一个匹配的下标。
    pub fn lsearch(&self, val: i32) -> Option<usize> {
        self.iter().position(|&item| item == val)
    }

    /// 二分查找。数组必须已经升序排列，否则结果没有意义（但不会越界）。
    pub fn bsearch(&self, val: i32) -> Option<usize> {
        let items = self.as_slice();
        let (mut lo, mut hi) = (0, items.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match items[mid].cmp(&val) {
                Ordering::Equal => return Some(mid),
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }
        None
    }

    /// 原地选择排序，O(n²)，不保证稳定。
    pub fn sort(&mut self, order: SortOrder) {
        let items = self.as_mut_slice();
        for i in 0..items.len() {
            let mut pick = i;
            for j in i + 1..items.len() {
                let better = match order {
                    SortOrder::Ascending => items[j] < items[pick],
                    SortOrder::Descending => items[j] > items[pick],
                };
                if better {
                    pick = j;
                }
            }
            items.swap(i, pick);
        }
    }

    pub fn reverse(&mut self) {
        let items = self.as_mut_slice();
        let len = items.len();
        for i in 0..len / 2 {
            items.swap(i, len - i - 1);
        }
    }

    /// 把 `src` 的元素按顺序追加到末尾，`src` 保持不变。
    ///
    /// 先按倍增策略一次性扩容，失败时 `self` 不会被部分修改。
    pub fn concat(&mut self, src: &DynamicArray) -> Result<()> {
        self.grow_for(src.len)?;
        for &val in src.iter() {
            self.push_back(val)?;
        }
        Ok(())
    }

    /// 长度相同且逐个元素相等，容量不参与比较。
    pub fn equals(&self, other: &DynamicArray) -> bool {
        self.as_slice() == other.as_slice()
    }

    /// 以 `[a, b, c]` 的形式打印到标准输出。
    pub fn print(&self) {
        println!("{self}");
    }

    /// 清空元素。长度不超过 `INIT_CAPACITY` 时保留容量，否则缩回 `INIT_CAPACITY`。
    pub fn clear(&mut self) -> Result<()> {
        if self.len <= INIT_CAPACITY {
            self.len = 0;
            return Ok(());
        }

        debug!(len = self.len, cap = self.cap, "clear releases surplus capacity");
        self.do_realloc(INIT_CAPACITY)?;
        self.len = 0;
        Ok(())
    }

    /// 把容量精确设为 `target`，`target < len` 时截断多出的元素。
    pub fn resize(&mut self, target: usize) -> Result<()> {
        self.do_realloc(target)
    }

    /// 缩小容量以适应当前长度
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        self.do_realloc(self.len)
    }

    /// 尝试预留容量（OOM 防护接口）
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        let required_cap = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        if required_cap > self.cap {
            self.do_realloc(required_cap)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, i32> {
        self.as_mut_slice().iter_mut()
    }

    /// 按倍增策略扩容，直到能再容纳 `additional` 个元素。
    fn grow_for(&mut self, additional: usize) -> Result<()> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(ArrayError::CapacityOverflow)?;
        if required <= self.cap {
            return Ok(());
        }

        let mut new_cap = if self.cap == 0 { INIT_CAPACITY } else { self.cap };
        while new_cap < required {
            new_cap = new_cap
                .checked_mul(GROW_FACTOR)
                .ok_or(ArrayError::CapacityOverflow)?;
        }
        self.do_realloc(new_cap)
    }

    /// 重新分配到恰好 `new_cap` 个槽位。失败时原缓冲区、长度和容量都不变。
    fn do_realloc(&mut self, new_cap: usize) -> Result<()> {
        if new_cap == self.cap {
            return Ok(());
        }
        if new_cap == 0 {
            self.release();
            return Ok(());
        }

        let new_layout = Layout::array::<i32>(new_cap).map_err(|_| ArrayError::CapacityOverflow)?;
        let new_ptr = if self.cap == 0 {
            unsafe { alloc(new_layout) }
        } else {
            unsafe {
                realloc(
                    self.ptr.as_ptr() as *mut u8,
                    Self::layout(self.cap),
                    new_layout.size(),
                )
            }
        };

        self.ptr = NonNull::new(new_ptr as *mut i32).ok_or(ArrayError::AllocFailed {
            capacity: new_cap,
        })?;
        trace!(old_cap = self.cap, new_cap, "buffer reallocated");
        self.cap = new_cap;
        self.len = self.len.min(new_cap);
        Ok(())
    }

    fn release(&mut self) {
        if self.cap != 0 {
            unsafe {
                dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.cap));
            }
            trace!(old_cap = self.cap, "buffer released");
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
        self.len = 0;
    }

    fn layout(cap: usize) -> Layout {
        // SAFETY: cap 只会来自之前成功的 Layout::array::<i32>(cap)
        unsafe { Layout::from_size_align_unchecked(cap * mem::size_of::<i32>(), mem::align_of::<i32>()) }
    }
}

impl Drop for DynamicArray {
    fn drop(&mut self) {
        self.release();
    }
}

impl Clone for DynamicArray {
    fn clone(&self) -> Self {
        let cap = self.cap.max(1);
        let mut copy = Self::unallocated();
        if copy.do_realloc(cap).is_err() {
            handle_alloc_error(Self::layout(cap));
        }
        unsafe {
            ptr::copy_nonoverlapping(self.ptr.as_ptr(), copy.ptr.as_ptr(), self.len);
        }
        copy.len = self.len;
        copy
    }
}

impl Deref for DynamicArray {
    type Target = [i32];
    fn deref(&self) -> &[i32] {
        self.as_slice()
    }
}

impl DerefMut for DynamicArray {
    fn deref_mut(&mut self) -> &mut [i32] {
        self.as_mut_slice()
    }
}

impl PartialEq for DynamicArray {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for DynamicArray {}

impl fmt::Display for DynamicArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, val) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{val}")?;
        }
        write!(f, "]")
    }
}

impl fmt::Debug for DynamicArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicArray")
            .field("len", &self.len)
            .field("capacity", &self.cap)
            .field("items", &self.as_slice())
            .finish()
    }
}

// 迭代器支持
pub struct IntoIter {
    array: DynamicArray,
    next: usize,
}

impl IntoIterator for DynamicArray {
    type Item = i32;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            array: self,
            next: 0,
        }
    }
}

impl Iterator for IntoIter {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let val = self.array.as_slice().get(self.next).copied()?;
        self.next += 1;
        Some(val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IntoIter {}

// 借用迭代器
impl<'a> IntoIterator for &'a DynamicArray {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut DynamicArray {
    type Item = &'a mut i32;
    type IntoIter = std::slice::IterMut<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests;
