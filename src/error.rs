use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Errors are only ever produced while *loading* support tables. Queries against a loaded
/// [`crate::SupportTable`] never fail; an identifier that cannot be resolved for any reason
/// simply yields `None`.
///
/// # Error Categories
///
/// ## Table Parsing Errors
/// - [`Error::Malformed`] - Corrupted or invalid support table structure
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of a table
/// - [`Error::NotSupported`] - Unknown magic or format version
/// - [`Error::Empty`] - Empty resource provided
/// - [`Error::DepthLimitExceeded`] - Attribute value nested too deeply
///
/// ## Resource Errors
/// - [`Error::ResourceNotFound`] - A library resource is missing
/// - [`Error::FileError`] - Filesystem or decompression I/O errors
///
/// # Examples
///
/// ```rust,no_run
/// use netoffice_compat::{Error, SupportTable, SupportTableConfig};
///
/// match SupportTable::with_config(SupportTableConfig::from_directory("tables")) {
///     Ok(table) => println!("{} libraries loaded", table.store().len()),
///     Err(Error::ResourceNotFound(name)) => eprintln!("missing resource: {name}"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("Malformed table: {} ({}:{})", message, file, line);
///     }
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The support table is damaged and could not be parsed.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing a table.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// The data is not a support table this crate understands.
    ///
    /// Raised for a wrong magic value or an unknown major format version.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// File I/O error.
    ///
    /// Wraps I/O errors from reading resource files and from gzip decompression.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// A required library resource could not be found.
    ///
    /// Every supported library must ship its support table; a missing one is a
    /// packaging defect and aborts construction.
    #[error("{0} not found")]
    ResourceNotFound(String),

    /// Attribute values are nested deeper than the parser allows.
    ///
    /// The associated value is the limit that was exceeded.
    #[error("Reach the maximum nesting depth allowed - {0}")]
    DepthLimitExceeded(usize),
}
