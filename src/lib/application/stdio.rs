use std::io::{self, BufRead, Write};

/// Ask for the task on `output` and read one line from `input`.
pub fn read_task<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<String> {
    writeln!(output, "\nWhat do you want to do?")?;
    write!(output, "Your task: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
