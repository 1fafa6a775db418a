//! Whitespace-separated text form of the containers.
//!
//! Writing pads each sequence with one tab per index below its start index,
//! so the rows of a [`TriangularMatrix`] line up in columns. Reading fills a
//! container of known shape; it never infers the shape from the input.

use crate::{AlgebraError, Sequence, TriangularMatrix};
use ark_std::{
    fmt::{self, Display, Write as _},
    str::FromStr,
    vec::*,
};

impl<R: Display> Display for Sequence<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.start_index() {
            f.write_char('\t')?;
        }
        for val in self.iter() {
            write!(f, "{val}\t")?;
        }
        Ok(())
    }
}

impl<R: Display> Display for TriangularMatrix<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter() {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

/// Fills an existing container from whitespace-separated tokens.
///
/// On error the container is left unchanged. Tokens past the container's
/// element count are not consumed.
pub trait ReadElements {
    fn read_tokens<'a, I>(&mut self, tokens: &mut I) -> Result<(), AlgebraError>
    where
        I: Iterator<Item = &'a str>;

    fn read_str(&mut self, s: &str) -> Result<(), AlgebraError> {
        self.read_tokens(&mut s.split_whitespace())
    }
}

/// Parses `n` tokens, numbering them from `first` for error reporting.
fn parse_tokens<'a, R, I>(tokens: &mut I, n: usize, first: usize) -> Result<Vec<R>, AlgebraError>
where
    R: FromStr,
    I: Iterator<Item = &'a str>,
{
    (first..first + n)
        .map(|pos| {
            tokens
                .next()
                .ok_or(AlgebraError::MissingElement(pos))?
                .parse::<R>()
                .map_err(|_| AlgebraError::InvalidElement(pos))
        })
        .collect()
}

impl<R: FromStr> ReadElements for Sequence<R> {
    fn read_tokens<'a, I>(&mut self, tokens: &mut I) -> Result<(), AlgebraError>
    where
        I: Iterator<Item = &'a str>,
    {
        let vals: Vec<R> = parse_tokens(tokens, self.len(), 0)?;
        self.iter_mut().zip(vals).for_each(|(r, v)| *r = v);
        Ok(())
    }
}

impl<R: FromStr> ReadElements for TriangularMatrix<R> {
    fn read_tokens<'a, I>(&mut self, tokens: &mut I) -> Result<(), AlgebraError>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut parsed: Vec<Vec<R>> = Vec::with_capacity(self.order());
        let mut read = 0;
        for row in self.iter() {
            parsed.push(parse_tokens(tokens, row.len(), read)?);
            read += row.len();
        }

        for (i, vals) in parsed.into_iter().enumerate() {
            let start = i as isize;
            for (j, val) in vals.into_iter().enumerate() {
                self.set(i as isize, start + j as isize, val)?;
            }
        }
        Ok(())
    }
}
