use std::io::{self, Write};

/// Cells are padded to the widest cell in their column plus this many spaces.
const PADDING: usize = 2;

/// Buffering writer that aligns tab-delimited columns before flushing.
///
/// Everything written through it is held in memory; [`TabWriter::finish`]
/// computes column widths across the whole buffer and writes the aligned
/// text to the underlying sink. The writer is shared by reference down the
/// renderer's recursion, and only the top of the call stack may finish it:
/// flushing early would compute widths over a partial buffer.
///
/// Alignment follows tab-stop semantics: consecutive lines containing tabs
/// form a block and are aligned together; a line without tabs terminates
/// the block and passes through verbatim. The last cell of a row is never
/// padded, so output carries no trailing spaces.
pub struct TabWriter<'a> {
    out: &'a mut dyn Write,
    buf: Vec<u8>,
}

impl<'a> TabWriter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        TabWriter {
            out,
            buf: Vec::new(),
        }
    }

    /// Align the buffered text and write it out. Call exactly once.
    pub fn finish(self) -> io::Result<()> {
        let TabWriter { out, buf } = self;

        let ends_with_newline = buf.ends_with(b"\n");
        let mut lines: Vec<&[u8]> = buf.split(|&b| b == b'\n').collect();
        if ends_with_newline {
            lines.pop();
        }

        let mut block: Vec<Vec<&[u8]>> = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let last = i + 1 == lines.len();
            let newline = !last || ends_with_newline;

            if line.contains(&b'\t') {
                block.push(line.split(|&b| b == b'\t').collect());
                if last {
                    flush_block(out, &block, newline)?;
                }
                continue;
            }

            flush_block(out, &block, true)?;
            block.clear();
            out.write_all(line)?;
            if newline {
                out.write_all(b"\n")?;
            }
        }

        out.flush()
    }
}

fn flush_block(
    out: &mut dyn Write,
    block: &[Vec<&[u8]>],
    trailing_newline: bool,
) -> io::Result<()> {
    if block.is_empty() {
        return Ok(());
    }

    // Width of column i over every row that has a cell after it; trailing
    // cells are written as-is.
    let mut widths: Vec<usize> = Vec::new();
    for row in block {
        for (i, cell) in row.iter().enumerate() {
            if i + 1 == row.len() {
                continue;
            }
            let width = cell_width(cell);
            if i >= widths.len() {
                widths.push(width);
            } else if width > widths[i] {
                widths[i] = width;
            }
        }
    }

    for (r, row) in block.iter().enumerate() {
        for (i, cell) in row.iter().enumerate() {
            out.write_all(cell)?;
            if i + 1 < row.len() {
                let pad = widths[i] + PADDING - cell_width(cell);
                out.write_all(" ".repeat(pad).as_bytes())?;
            }
        }
        if r + 1 < block.len() || trailing_newline {
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn cell_width(cell: &[u8]) -> usize {
    String::from_utf8_lossy(cell).chars().count()
}

impl Write for TabWriter<'_> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op: alignment happens in finish().
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aligned(input: &str) -> String {
        let mut out = Vec::new();
        let mut tw = TabWriter::new(&mut out);
        tw.write_all(input.as_bytes()).unwrap();
        tw.finish().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn pads_columns_with_two_cell_minimum() {
        assert_eq!(
            aligned("Deploys:\t7\nName:\tmyapp\n"),
            "Deploys:  7\nName:     myapp\n"
        );
    }

    #[test]
    fn blank_line_splits_alignment_blocks() {
        // The wide cell in the second block must not widen the first.
        assert_eq!(
            aligned("a\tb\n\nlongcell\tb\n"),
            "a  b\n\nlongcell  b\n"
        );
    }

    #[test]
    fn leading_tab_indents_by_padding_width() {
        assert_eq!(
            aligned("\tID\tSTATUS\n\tunit1\tstarted\n"),
            "  ID     STATUS\n  unit1  started\n"
        );
    }

    #[test]
    fn untabbed_lines_pass_through_verbatim() {
        assert_eq!(aligned("Units:\n"), "Units:\n");
        assert_eq!(aligned("no tabs at all"), "no tabs at all");
    }

    #[test]
    fn no_trailing_spaces_on_last_cell() {
        let out = aligned("a\tbb\naaaa\tb\n");
        for line in out.lines() {
            assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn empty_buffer_writes_nothing() {
        assert_eq!(aligned(""), "");
    }

    #[test]
    fn width_counts_chars_not_bytes() {
        assert_eq!(aligned("héllo\tx\nab\ty\n"), "héllo  x\nab     y\n");
    }
}
