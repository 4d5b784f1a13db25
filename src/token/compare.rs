//! 常量时间比较

use subtle::{Choice, ConstantTimeEq};

/// 常量时间比较两个字节串
///
/// 长度是否相等也折叠进同一个 `Choice`，不会在进入比较前提前返回。
/// 逐字节比较按较长一方的长度固定迭代，不因字节不一致而提前退出。
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let len_eq = (a.len() as u64).ct_eq(&(b.len() as u64));

    let mut bytes_eq = Choice::from(1u8);
    for i in 0..a.len().max(b.len()) {
        let x = a.get(i).copied().unwrap_or(0);
        let y = b.get(i).copied().unwrap_or(0);
        bytes_eq &= x.ct_eq(&y);
    }

    (len_eq & bytes_eq).into()
}

/// 常量时间比较两个字符串
pub fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
