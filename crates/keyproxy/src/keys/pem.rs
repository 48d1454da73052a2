use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

const BEGIN: &[u8] = b"-----BEGIN ";
const END: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";

/// One armored block: its label and decoded contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub label: String,
    pub contents: Vec<u8>,
}

/// Returns the first well-formed PEM block in `data`.
///
/// Text before and after the block is ignored, as are blocks that fail to
/// decode. Base64 lines may have any width; RFC 1421 headers are skipped.
pub(crate) fn decode_first(data: &[u8]) -> Option<Block> {
    let mut offset = 0;
    while let Some(found) = find(&data[offset..], BEGIN) {
        let start = offset + found;
        offset = start + BEGIN.len();
        // BEGIN markers only count at the start of a line.
        if start > 0 && data[start - 1] != b'\n' {
            continue;
        }
        if let Some(block) = decode_block(&data[offset..]) {
            return Some(block);
        }
    }
    None
}

fn decode_block(after_begin: &[u8]) -> Option<Block> {
    let line_len = after_begin
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(after_begin.len());
    let label = after_begin[..line_len].trim_ascii_end().strip_suffix(DASHES)?;
    let label = std::str::from_utf8(label).ok()?;

    let body = after_begin.get(line_len + 1..)?;
    let end_marker = [END, label.as_bytes(), DASHES].concat();
    let end = find(body, &end_marker)?;
    let contents = decode_body(&body[..end])?;

    Some(Block {
        label: label.to_string(),
        contents,
    })
}

fn decode_body(body: &[u8]) -> Option<Vec<u8>> {
    let text = std::str::from_utf8(body).ok()?;
    let mut lines = text.lines().peekable();
    if lines.peek().is_some_and(|line| line.contains(':')) {
        // Headers end at the first blank line.
        lines.by_ref().take_while(|line| !line.trim().is_empty()).for_each(drop);
    }

    let encoded: String = lines
        .flat_map(str::chars)
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD.decode(encoded).ok()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

#[cfg(test)]
pub(crate) fn encode(label: &str, contents: &[u8], width: usize) -> String {
    let encoded = STANDARD.encode(contents);
    let mut pem = format!("-----BEGIN {label}-----\n");
    for line in encoded.as_bytes().chunks(width) {
        pem.push_str(std::str::from_utf8(line).unwrap_or_default());
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {label}-----\n"));
    pem
}
