use std::io::{BufRead, Write};
use std::str::FromStr;

//////////////////////////////////////////////////////////
// Terminal I/O
//////////////////////////////////////////////////////////
/// Asks `question` until the answer parses. An empty answer takes `default`.
pub fn prompt_with_default<T, R, W>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default: &str,
) -> std::io::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{} [{}]: ", question, default)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("No answer given for '{}'", question),
            ));
        }

        let answer = match line.trim() {
            "" => default,
            a => a,
        };
        match answer.parse::<T>() {
            Ok(v) => return Ok(v),
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }
}

/// Returns `value` if it was given on the command line, asks for it otherwise.
pub fn value_or_prompt<T>(value: Option<T>, question: &str, default: &str) -> std::io::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(v) => Ok(v),
        None => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            prompt_with_default(&mut stdin.lock(), &mut stdout, question, default)
        }
    }
}
