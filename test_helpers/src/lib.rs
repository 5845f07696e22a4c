//! Test helpers shared across crates.
//!
//! This crate provides terse builders for descriptors and mapping
//! specifications, and a scratch-project writer for pipeline tests.

pub mod shapes {
    //! Shorthand constructors for [`Shape`] values.
    //!
    //! # Examples
    //!
    //! ```
    //! use fieldmap_test_helpers::shapes::{opt, scalar, vec_of};
    //!
    //! assert_eq!(opt(scalar("i64")).to_string(), "Option<i64>");
    //! assert_eq!(vec_of(opt(scalar("u8"))).to_string(), "Vec<Option<u8>>");
    //! ```

    use fieldmap::Shape;

    /// A named scalar.
    #[must_use]
    pub fn scalar(name: &str) -> Shape {
        Shape::scalar(name)
    }

    /// `Option<inner>`.
    #[must_use]
    pub fn opt(inner: Shape) -> Shape {
        Shape::pointer(inner)
    }

    /// `Vec<inner>`.
    #[must_use]
    pub fn vec_of(inner: Shape) -> Shape {
        Shape::slice(inner)
    }

    /// `HashMap<key, value>`.
    #[must_use]
    pub fn map_of(key: Shape, value: Shape) -> Shape {
        Shape::map(key, value)
    }
}

pub mod records {
    //! Builders for records and mapping specifications.

    use fieldmap::{FieldDescriptor, MappingSpec, Shape, StructDescriptor};

    /// Module path assigned to records built by [`record`].
    pub const MODELS_PATH: &str = "crate::models";

    /// A field descriptor.
    #[must_use]
    pub fn field(name: &str, shape: Shape) -> FieldDescriptor {
        FieldDescriptor::new(name, shape)
    }

    /// A record in [`MODELS_PATH`] with `(name, shape)` fields in order.
    #[must_use]
    pub fn record(name: &str, fields: &[(&str, Shape)]) -> StructDescriptor {
        StructDescriptor::new(
            name,
            MODELS_PATH,
            fields
                .iter()
                .map(|(field_name, shape)| field(field_name, shape.clone()))
                .collect(),
        )
    }

    /// A specification mapping `sources` (alias, record) into `destination`
    /// bound to `dst`.
    #[must_use]
    pub fn spec(destination: StructDescriptor, sources: Vec<(&str, StructDescriptor)>) -> MappingSpec {
        sources
            .into_iter()
            .fold(MappingSpec::new("dst", destination), |acc, (alias, source)| {
                acc.with_source(alias, source)
            })
    }
}

pub mod project {
    //! Scratch projects for exercising the generator against real files.

    use std::fs;
    use std::io;

    use camino::{Utf8Path, Utf8PathBuf};

    /// Writes `contents` to `root/relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while creating directories or writing.
    pub fn write_file(root: &Utf8Path, relative: &str, contents: &str) -> io::Result<Utf8PathBuf> {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Converts a temporary directory path into a UTF-8 path.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::InvalidData`] when the path is not UTF-8.
    pub fn utf8_root(path: &std::path::Path) -> io::Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(path.to_path_buf()).map_err(|original| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("non UTF-8 path: {}", original.display()),
            )
        })
    }
}
