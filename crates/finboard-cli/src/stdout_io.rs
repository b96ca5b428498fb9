use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_stdout(text, false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_stdout(text, true)
}

/// A reader that closed the pipe early (`finboard table rows.json | head`)
/// is not an error.
fn write_stdout(text: &str, newline: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(write_all_and_flush(&mut stdout, text, newline))
}

fn write_all_and_flush(writer: &mut dyn Write, text: &str, newline: bool) -> io::Result<()> {
    writer.write_all(text.as_bytes())?;
    if newline {
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
