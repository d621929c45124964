//! Server-sent event framing for the progress stream

use super::ProgressEvent;

/// Encode one event as an SSE frame (`data: <json>` plus a blank line)
pub fn encode_event(event: &ProgressEvent) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(event)?;
    Ok(format!("data: {}\n\n", json))
}

/// Incremental SSE decoder.
///
/// Chunks may split frames anywhere, including between the `\r` and `\n`
/// of a CRLF pair. Lines may end in LF, CRLF or a bare CR. Each complete
/// frame yields the concatenation of its `data:` lines; comments and other
/// fields are dropped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: String,
    /// The previous chunk ended in `\r`, so a leading `\n` completes that pair
    after_cr: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk, returning the data payload of every completed frame
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        if chunk.is_empty() {
            return Vec::new();
        }
        let chunk = match chunk.strip_prefix('\n') {
            Some(rest) if self.after_cr => rest,
            _ => chunk,
        };
        self.after_cr = chunk.ends_with('\r');
        self.buffer.push_str(&chunk.replace("\r\n", "\n").replace('\r', "\n"));

        let mut payloads = Vec::new();
        while let Some(end) = self.buffer.find("\n\n") {
            let frame: String = self.buffer.drain(..end + 2).collect();
            if let Some(data) = frame_data(&frame) {
                payloads.push(data);
            }
        }
        payloads
    }

    /// Whether a partial frame is still buffered
    pub fn has_pending(&self) -> bool {
        !self.buffer.trim().is_empty()
    }
}

fn frame_data(frame: &str) -> Option<String> {
    let mut data: Vec<&str> = Vec::new();

    for line in frame.lines() {
        if line.starts_with(':') {
            continue;
        }
        if let Some(value) = line.strip_prefix("data:") {
            data.push(value.strip_prefix(' ').unwrap_or(value));
        }
    }

    if data.is_empty() {
        None
    } else {
        Some(data.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_frame() {
        let event = ProgressEvent::new(1, 10, "Customizing template");
        let frame = encode_event(&event).unwrap();
        assert_eq!(
            frame,
            "data: {\"message\":\"Customizing template\",\"step\":1,\"progress\":10}\n\n"
        );
    }

    #[test]
    fn test_frame_split_across_chunks() {
        let mut decoder = SseDecoder::new();
        assert!(decoder.push("data: {\"a\":").is_empty());
        assert!(decoder.has_pending());
        assert!(decoder.push("1}\n").is_empty());
        let payloads = decoder.push("\ndata: 2\n\n");
        assert_eq!(payloads, vec!["{\"a\":1}".to_string(), "2".to_string()]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_crlf_split_between_chunks() {
        let mut decoder = SseDecoder::new();
        let mut payloads = decoder.push("data: a\r\n\r");
        payloads.extend(decoder.push("\n"));
        assert_eq!(payloads, vec!["a".to_string()]);
        assert!(!decoder.has_pending());

        // The next frame is unaffected by the swallowed LF
        assert_eq!(decoder.push("data: b\r\n\r\n"), vec!["b".to_string()]);
    }

    #[test]
    fn test_bare_cr_line_endings() {
        let mut decoder = SseDecoder::new();
        assert_eq!(decoder.push("data: a\r\rdata: b\r"), vec!["a".to_string()]);
        assert_eq!(decoder.push("\r"), vec!["b".to_string()]);
        assert!(!decoder.has_pending());
    }

    #[test]
    fn test_multiline_data_and_comments() {
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(": keep-alive\n\nevent: progress\ndata: first\ndata: second\r\n\r\n");
        assert_eq!(payloads, vec!["first\nsecond".to_string()]);
    }

    #[test]
    fn test_round_trip_event() {
        let mut event = ProgressEvent::new(6, 100, "Done");
        event.store_url = Some("https://shop.myshopify.io".to_string());
        let mut decoder = SseDecoder::new();
        let payloads = decoder.push(&encode_event(&event).unwrap());
        let decoded: ProgressEvent = serde_json::from_str(&payloads[0]).unwrap();
        assert_eq!(decoded, event);
        assert!(decoded.is_terminal());
    }
}
