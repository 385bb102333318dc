use std::io::{self, BufRead};

/// Lazy whitespace tokenizer over a byte stream.
///
/// A token is a maximal run of bytes that are not ASCII whitespace
/// (space, tab, line feed, carriage return, form feed). Punctuation is
/// kept as-is; sentence terminators are detected downstream with
/// [`is_terminal`].
///
/// # Notes
/// - Single pass: the underlying reader is consumed as tokens are pulled.
/// - Bytes are decoded as UTF-8 lossily, so invalid sequences never abort
///   a corpus.
/// - After an I/O error the error is yielded once and the iterator ends.
pub struct Tokens<R> {
	reader: R,
	done: bool,
}

impl<R: BufRead> Tokens<R> {
	/// Wraps a buffered reader.
	pub fn new(reader: R) -> Self {
		Self { reader, done: false }
	}
}

impl<R: BufRead> Iterator for Tokens<R> {
	type Item = io::Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		let mut token: Vec<u8> = Vec::new();
		loop {
			let buf = match self.reader.fill_buf() {
				Ok(buf) => buf,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => {
					self.done = true;
					return Some(Err(e));
				}
			};
			if buf.is_empty() {
				self.done = true;
				break;
			}

			let mut used = 0;
			let mut complete = false;
			for &byte in buf {
				used += 1;
				if byte.is_ascii_whitespace() {
					if !token.is_empty() {
						complete = true;
						break;
					}
				} else {
					token.push(byte);
				}
			}
			self.reader.consume(used);

			if complete {
				break;
			}
		}

		if token.is_empty() {
			None
		} else {
			Some(Ok(String::from_utf8_lossy(&token).into_owned()))
		}
	}
}

/// Returns `true` if the token ends a sentence (contains a `.` anywhere).
pub fn is_terminal(token: &str) -> bool {
	token.contains('.')
}
