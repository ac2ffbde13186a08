// Copyright 2024 sqmatmul authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `const fn` parsing of decimal integers, used for configuration values
//! taken from the build environment.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ParseIntError {
    Empty,
    InvalidDigit,
    Overflow,
}

/// Parse the input to usize
pub(crate) const fn parse(s: &str) -> Result<usize, ParseIntError> {
    let bytes = s.as_bytes();
    if bytes.is_empty() {
        return Err(ParseIntError::Empty);
    }

    let mut result: usize = 0;
    let mut index = 0;
    while index < bytes.len() {
        let digit = bytes[index].wrapping_sub(b'0');
        if digit > 9 {
            return Err(ParseIntError::InvalidDigit);
        }
        result = match result.checked_mul(10) {
            Some(r) => match r.checked_add(digit as usize) {
                Some(r) => r,
                None => return Err(ParseIntError::Overflow),
            },
            None => return Err(ParseIntError::Overflow),
        };
        index += 1;
    }
    Ok(result)
}

/// Parse the input to a nonzero integer; or otherwise cause
/// a const error, an "unwarp" in space and time.
pub(crate) const fn parse_unwarp(s: &str) -> usize {
    match parse(s) {
        Ok(t) if t > 0 => t,
        _ => panic!("failed to parse configuration value from the environment"),
    }
}
