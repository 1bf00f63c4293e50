//! A single document line and its tab-expanded render form.

/// Expand `content` into `out`, replacing each tab with spaces up to the next
/// multiple of `tab_stop`. `out` is cleared first.
pub fn expand_tabs(content: &[u8], tab_stop: usize, out: &mut Vec<u8>) {
    let tab_stop = tab_stop.max(1);
    out.clear();
    let tabs = content.iter().filter(|&&b| b == b'\t').count();
    out.reserve(content.len() + tabs * (tab_stop - 1));
    for &b in content {
        if b == b'\t' {
            out.push(b' ');
            while out.len() % tab_stop != 0 {
                out.push(b' ');
            }
        } else {
            out.push(b);
        }
    }
}

/// Render column reached after walking `content[..cx]`.
pub fn cx_to_rx(content: &[u8], cx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut rx = 0;
    for &b in content.iter().take(cx) {
        if b == b'\t' {
            rx += (tab_stop - 1) - (rx % tab_stop);
        }
        rx += 1;
    }
    rx
}

/// Inverse of [`cx_to_rx`]: the first `cx` whose render span ends past `rx`,
/// or `content.len()` when `rx` lies beyond the rendered width.
pub fn rx_to_cx(content: &[u8], rx: usize, tab_stop: usize) -> usize {
    let tab_stop = tab_stop.max(1);
    let mut cur_rx = 0;
    for (cx, &b) in content.iter().enumerate() {
        if b == b'\t' {
            cur_rx += (tab_stop - 1) - (cur_rx % tab_stop);
        }
        cur_rx += 1;
        if cur_rx > rx {
            return cx;
        }
    }
    content.len()
}

/// One logical line: literal bytes plus the derived render bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    content: Vec<u8>,
    render: Vec<u8>,
    tab_stop: usize,
}

impl Row {
    pub fn new(content: impl Into<Vec<u8>>, tab_stop: usize) -> Self {
        let mut row = Self {
            content: content.into(),
            render: Vec::new(),
            tab_stop: tab_stop.max(1),
        };
        row.regenerate_render();
        row
    }

    pub fn empty(tab_stop: usize) -> Self {
        Self::new(Vec::new(), tab_stop)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn render(&self) -> &[u8] {
        &self.render
    }

    /// Byte length of `content`.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn tab_stop(&self) -> usize {
        self.tab_stop
    }

    pub fn cx_to_rx(&self, cx: usize) -> usize {
        cx_to_rx(&self.content, cx, self.tab_stop)
    }

    pub fn rx_to_cx(&self, rx: usize) -> usize {
        rx_to_cx(&self.content, rx, self.tab_stop)
    }

    /// Rebuild `render` from `content`.
    pub fn regenerate_render(&mut self) {
        expand_tabs(&self.content, self.tab_stop, &mut self.render);
    }

    /// Insert `c` at `at` (clamped to the append slot).
    pub fn insert_byte(&mut self, at: usize, c: u8) {
        let at = at.min(self.content.len());
        self.content.insert(at, c);
        self.regenerate_render();
    }

    /// Remove the byte at `at`. Returns the removed byte, `None` when out of range.
    pub fn remove_byte(&mut self, at: usize) -> Option<u8> {
        if at >= self.content.len() {
            return None;
        }
        let b = self.content.remove(at);
        self.regenerate_render();
        Some(b)
    }

    pub fn append_bytes(&mut self, bytes: &[u8]) {
        self.content.extend_from_slice(bytes);
        self.regenerate_render();
    }

    /// Truncate `content` at `at`, returning the tail as a new row.
    pub fn split_off(&mut self, at: usize) -> Row {
        let at = at.min(self.content.len());
        let tail = self.content.split_off(at);
        self.regenerate_render();
        Row::new(tail, self.tab_stop)
    }

    /// Byte offset of the first occurrence of `needle` in `render`.
    pub fn find_in_render(&self, needle: &[u8]) -> Option<usize> {
        if needle.is_empty() {
            return Some(0);
        }
        self.render
            .windows(needle.len())
            .position(|window| window == needle)
    }
}
