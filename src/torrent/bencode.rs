//! Minimal bencode decoder, enough to read a metafile's `info` dictionary

/// Nesting deeper than this is rejected instead of recursing further
const MAX_DEPTH: usize = 64;

/// A decoded bencode value borrowing from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<'a> {
    /// `i<digits>e`
    Int(i64),
    /// `<len>:<bytes>`
    Bytes(&'a [u8]),
    /// `l...e`
    List(Vec<Value<'a>>),
    /// `d...e`, keys in input order
    Dict(Vec<(&'a [u8], Value<'a>)>),
}

impl<'a> Value<'a> {
    /// Look up `key` in a dictionary
    pub fn get(&self, key: &str) -> Option<&Value<'a>> {
        match self {
            Value::Dict(entries) => entries
                .iter()
                .find(|(k, _)| *k == key.as_bytes())
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Byte string contents
    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Value::Bytes(b) => Some(*b),
            _ => None,
        }
    }
}

/// Decode the first bencode value of `input`; trailing bytes are ignored
pub fn decode(input: &[u8]) -> Result<Value<'_>, String> {
    let mut decoder = Decoder { input, pos: 0 };
    decoder.value(0)
}

struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Decoder<'a> {
    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn value(&mut self, depth: usize) -> Result<Value<'a>, String> {
        if depth > MAX_DEPTH {
            return Err(format!("nesting deeper than {} at offset {}", MAX_DEPTH, self.pos));
        }
        match self.peek() {
            Some(b'i') => {
                self.pos += 1;
                let digits = self.until(b'e')?;
                let text = std::str::from_utf8(digits).map_err(|_| "non-ascii integer".to_string())?;
                text.parse::<i64>()
                    .map(Value::Int)
                    .map_err(|e| format!("invalid integer {:?}: {}", text, e))
            }
            Some(b'l') => {
                self.pos += 1;
                let mut items = Vec::new();
                while self.peek() != Some(b'e') {
                    items.push(self.value(depth + 1)?);
                }
                self.pos += 1;
                Ok(Value::List(items))
            }
            Some(b'd') => {
                self.pos += 1;
                let mut entries = Vec::new();
                while self.peek() != Some(b'e') {
                    let key = self.bytes()?;
                    let value = self.value(depth + 1)?;
                    entries.push((key, value));
                }
                self.pos += 1;
                Ok(Value::Dict(entries))
            }
            Some(b'0'..=b'9') => self.bytes().map(Value::Bytes),
            Some(other) => Err(format!(
                "unexpected byte {:#04x} at offset {}",
                other, self.pos
            )),
            None => Err(format!("unexpected end of input at offset {}", self.pos)),
        }
    }

    fn bytes(&mut self) -> Result<&'a [u8], String> {
        let start = self.pos;
        let digits = self.until(b':')?;
        let len = std::str::from_utf8(digits)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| format!("invalid string length at offset {}", start))?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.input.len())
            .ok_or_else(|| format!("string at offset {} runs past end of input", start))?;
        let bytes = &self.input[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Bytes up to (not including) `delim`; the delimiter is consumed
    fn until(&mut self, delim: u8) -> Result<&'a [u8], String> {
        let rest = &self.input[self.pos..];
        let idx = rest
            .iter()
            .position(|b| *b == delim)
            .ok_or_else(|| format!("missing {:?} after offset {}", delim as char, self.pos))?;
        self.pos += idx + 1;
        Ok(&rest[..idx])
    }
}
