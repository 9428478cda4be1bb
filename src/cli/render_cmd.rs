//! Handler for `gild --render`.

use std::io::{Read, Write};
use std::path::Path;

use crate::error::GildError;
use crate::render::{render_tree, render_tree_strict};

pub(crate) fn run_render(
    input: &Path,
    strict: bool,
    out: &mut dyn Write,
) -> Result<bool, GildError> {
    let text = read_input(input)?;

    let rendered = if strict {
        match render_tree_strict(&text) {
            Ok(rendered) => rendered,
            Err(e) => {
                log::error!("{}: unbalanced parse tree: {}", input.display(), e);
                return Ok(false);
            }
        }
    } else {
        render_tree(&text)
    };

    out.write_all(rendered.as_bytes())
        .and_then(|()| out.flush())
        .map_err(GildError::Report)?;
    Ok(true)
}

/// Read a file, or stdin for `-`
pub(crate) fn read_input(input: &Path) -> Result<String, GildError> {
    let result = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(input)
    };
    result.map_err(|source| GildError::Read {
        path: input.to_path_buf(),
        source,
    })
}
