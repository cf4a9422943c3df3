use regex::Regex;
use thiserror::Error;

/// Separator between the original read name and the barcodes
pub const BARCODE_SEPARATOR: &str = "::";

/// Delimiter used to join extracted barcodes into a cluster key
pub const KEY_DELIMITER: &str = ".";

/// A single bracketed barcode. `\w` in the `regex` crate is Unicode-aware, so
/// the ASCII word class is spelled out.
const BARCODE_GROUP: &str = r"\[([0-9A-Za-z_]+)\]";

#[derive(Error, Debug)]
pub enum BarcodeError {
    #[error("Number of barcodes must be at least 1")]
    NoBarcodes,

    #[error("Read name '{name}' does not contain {expected} bracketed barcodes after '::'")]
    MalformedName { name: String, expected: usize },

    #[error("Invalid barcode pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Extracts barcodes embedded in read names of the form
/// `ORIGINAL_READ_NAME::[Barcode1][Barcode2][Barcode3]`.
///
/// The `::` separator must be followed immediately by exactly `num_barcodes`
/// bracketed groups of ASCII word characters. The pattern may appear anywhere
/// in the name and anything after the last group is ignored.
///
/// ```
/// use barcode_clusters::parsing::barcode::BarcodeExtractor;
///
/// let extractor = BarcodeExtractor::new(3).unwrap();
/// let key = extractor.extract_key("readA::[AAA][BBB][CCC]").unwrap();
/// assert_eq!(key, "AAA.BBB.CCC");
/// ```
#[derive(Debug, Clone)]
pub struct BarcodeExtractor {
    num_barcodes: usize,
    pattern: Regex,
}

impl BarcodeExtractor {
    /// # Errors
    ///
    /// Returns `BarcodeError::NoBarcodes` if `num_barcodes` is zero, or
    /// `BarcodeError::Pattern` if the pattern cannot be compiled.
    pub fn new(num_barcodes: usize) -> Result<Self, BarcodeError> {
        if num_barcodes == 0 {
            return Err(BarcodeError::NoBarcodes);
        }

        let pattern = format!(
            "{}{}",
            regex::escape(BARCODE_SEPARATOR),
            BARCODE_GROUP.repeat(num_barcodes)
        );

        Ok(Self {
            num_barcodes,
            pattern: Regex::new(&pattern)?,
        })
    }

    #[must_use]
    pub fn num_barcodes(&self) -> usize {
        self.num_barcodes
    }

    /// Return the barcodes embedded in `name`, in order of appearance
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::MalformedName` if `name` does not contain the
    /// expected barcode pattern.
    pub fn extract<'a>(&self, name: &'a str) -> Result<Vec<&'a str>, BarcodeError> {
        let captures = self
            .pattern
            .captures(name)
            .ok_or_else(|| BarcodeError::MalformedName {
                name: name.to_string(),
                expected: self.num_barcodes,
            })?;

        // Every group is mandatory, so a match always captures all of them
        Ok(captures
            .iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str())
            .collect())
    }

    /// Extract the barcodes from `name` and join them into a cluster key
    ///
    /// # Errors
    ///
    /// Returns `BarcodeError::MalformedName` if `name` does not contain the
    /// expected barcode pattern.
    pub fn extract_key(&self, name: &str) -> Result<String, BarcodeError> {
        Ok(self.extract(name)?.join(KEY_DELIMITER))
    }
}
