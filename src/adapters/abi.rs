//! Call-data encoding for the naming contract's fixed ABI.
//!
//! Only two functions are ever called, so the 4-byte selectors are baked in
//! and the encoder handles just dynamic strings (offset head + length/data
//! tail, 32-byte aligned).

/// keccak256("register(string)")[..4]
const REGISTER_SELECTOR: [u8; 4] = [0xf2, 0xc2, 0x98, 0xbe];

/// keccak256("setRecord(string,string)")[..4]
const SET_RECORD_SELECTOR: [u8; 4] = [0xc1, 0x88, 0x0a, 0x98];

/// `0x`-prefixed call data for `register(label)`.
pub fn encode_register(label: &str) -> String {
    encode_call(REGISTER_SELECTOR, &[label])
}

/// `0x`-prefixed call data for `setRecord(label, value)`.
pub fn encode_set_record(label: &str, value: &str) -> String {
    encode_call(SET_RECORD_SELECTOR, &[label, value])
}

fn encode_call(selector: [u8; 4], args: &[&str]) -> String {
    let mut head = Vec::new();
    let mut tail = Vec::new();

    let mut offset = 32 * args.len();
    for arg in args {
        head.extend_from_slice(&encode_u256(offset as u128));
        let encoded = encode_string(arg);
        offset += encoded.len();
        tail.extend(encoded);
    }

    let mut data = selector.to_vec();
    data.extend(head);
    data.extend(tail);
    to_hex(&data)
}

fn encode_string(value: &str) -> Vec<u8> {
    let bytes = value.as_bytes();
    let mut out = encode_u256(bytes.len() as u128).to_vec();
    out.extend_from_slice(bytes);
    // pad data to the next 32-byte boundary
    let rem = bytes.len() % 32;
    if rem != 0 {
        out.extend(std::iter::repeat(0u8).take(32 - rem));
    }
    out
}

fn encode_u256(value: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&value.to_be_bytes());
    word
}

fn to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("0x");
    for byte in data {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}
