//! Start-up prompts for the grid and rectangle sizes.

use gridmark_core::{Canvas, EditorConfig, GridResult, MAX_SHAPES, parse_dimension_pair};
use std::io::{self, BufRead, Write};

/// Ask `question` until the answer is a positive integer pair that `accept`
/// also takes. Bad answers print an error and ask again. Returns `None` at
/// end of input.
pub fn ask_until<R, W, T>(
    input: &mut R,
    output: &mut W,
    question: &str,
    mut accept: impl FnMut(i64, i64) -> GridResult<T>,
) -> io::Result<Option<T>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{question} ")?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match parse_dimension_pair(&line).and_then(|(a, b)| accept(a, b)) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                log::debug!("Rejected input {:?}: {}", line.trim(), e);
                writeln!(output, "Input error: {e}")?;
            }
        }
    }
}

/// Ask for the grid size, then for the size of every rectangle, and build
/// the canvas. Returns `None` if input ends first.
pub fn setup_canvas<R, W>(
    input: &mut R,
    output: &mut W,
    config: &EditorConfig,
) -> io::Result<Option<Canvas>>
where
    R: BufRead,
    W: Write,
{
    let Some(mut canvas) = ask_until(input, output, "Grid size (rows, cols):", |rows, cols| {
        config.check_grid_size(rows, cols)?;
        Canvas::with_config(config, rows, cols)
    })?
    else {
        return Ok(None);
    };
    writeln!(output, "Total boxes: {}", canvas.grid().cell_count())?;

    for n in 1..=MAX_SHAPES {
        let question = format!("Rectangle {n} (width, height):");
        let placed = ask_until(input, output, &question, |width, height| {
            canvas.place_next(width, height).map(|shape| shape.label)
        })?;
        if placed.is_none() {
            return Ok(None);
        }
    }
    Ok(Some(canvas))
}
