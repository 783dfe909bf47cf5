//! Canonical CBOR encoding for block hashing.
//!
//! This module implements the subset of RFC 8949 Core Deterministic Encoding
//! needed for block headers:
//! - Map keys in encoded byte order
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are whole seconds)
//!
//! The same block always produces identical bytes, and thus an identical
//! hash, on every platform.

use crate::types::BlockHash;

/// Header field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR, so emitting them in numeric
/// order is also canonical byte order.
mod keys {
    pub const POSITION: u64 = 0;
    pub const CREATED_AT: u64 = 1;
    pub const PREVIOUS_HASH: u64 = 2;
    pub const PAYLOAD: u64 = 3;
}

const MAJOR_UINT: u8 = 0;
const MAJOR_NEGINT: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_MAP: u8 = 5;
const NULL: u8 = 0xf6;

/// Encode every hashed field of a block to canonical CBOR bytes.
///
/// The block's own `hash` is never part of its input.
pub fn canonical_header_bytes(
    position: u64,
    created_at: i64,
    previous_hash: Option<&BlockHash>,
    payload: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(48 + payload.len());
    encode_uint(&mut buf, MAJOR_MAP, 4);

    encode_uint(&mut buf, MAJOR_UINT, keys::POSITION);
    encode_uint(&mut buf, MAJOR_UINT, position);

    encode_uint(&mut buf, MAJOR_UINT, keys::CREATED_AT);
    encode_int(&mut buf, created_at);

    encode_uint(&mut buf, MAJOR_UINT, keys::PREVIOUS_HASH);
    match previous_hash {
        Some(hash) => encode_bytes(&mut buf, hash.as_bytes()),
        None => buf.push(NULL),
    }

    encode_uint(&mut buf, MAJOR_UINT, keys::PAYLOAD);
    encode_bytes(&mut buf, payload);
    buf
}

/// Encode a signed integer (major types 0 and 1).
fn encode_int(buf: &mut Vec<u8>, n: i64) {
    if n >= 0 {
        encode_uint(buf, MAJOR_UINT, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, MAJOR_NEGINT, !(n as u64));
    }
}

/// Encode an unsigned integer with the given major type, shortest form.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, MAJOR_BYTES, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}
