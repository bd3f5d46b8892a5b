//! Loading the trees of a phylogeny group from its JSON description.

use crate::error::{LoadError, LoadResult, TreeFormat};
use crate::model::PhyloTree;
use crate::newick::NewickParser;
use crate::nexml;
use crate::parser::ByteParser;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Key of the NeXML file path in a phylogeny group description.
pub const FILENAME_KEY: &str = "filename";
/// Key of the inline Newick string in a phylogeny group description.
pub const NEWICK_KEY: &str = "newick";

// =#========================================================================#=
// TREE SOURCE
// =#========================================================================#=
/// Where the trees of a phylogeny group come from.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeSource {
    /// Path of a NeXML file
    NeXml(PathBuf),
    /// Inline Newick string, possibly with several trees
    Newick(String),
    /// Neither given; the group has no trees
    Absent,
}

impl TreeSource {
    /// Reads the tree source from a group description.
    ///
    /// `filename` takes precedence over `newick` if both are given.
    ///
    /// # Errors
    /// [LoadError::InvalidInput] if the chosen value is not a string.
    pub fn from_json(group_id: &str, json: &Map<String, Value>) -> LoadResult<Self> {
        let as_string = |key: &str, value: &Value| -> LoadResult<String> {
            value.as_str().map(str::to_string).ok_or_else(|| {
                LoadError::invalid_input(
                    format!("phylogeny {group_id}"),
                    format!("'{key}' must be a string, found {value}"),
                )
            })
        };

        if let Some(filename) = json.get(FILENAME_KEY) {
            Ok(TreeSource::NeXml(PathBuf::from(as_string(FILENAME_KEY, filename)?)))
        } else if let Some(newick) = json.get(NEWICK_KEY) {
            Ok(TreeSource::Newick(as_string(NEWICK_KEY, newick)?))
        } else {
            Ok(TreeSource::Absent)
        }
    }
}

// =#========================================================================#=
// TREE LOADER
// =#========================================================================#=
/// Loads the trees of a [TreeSource].
///
/// # Configuration
/// * [`with_base_dir()`](Self::with_base_dir)
///     - Resolve relative NeXML paths against a directory
///       (default: the working directory)
/// * [`with_preserve_underscores()`](Self::with_preserve_underscores)
///     - Keep underscores in unquoted Newick labels
/// * [`without_newick_annotations()`](Self::without_newick_annotations)
///     - Skip extended Newick annotations (`[&key=value]`) as comments;
///       by default they are read into vertex annotations
///
/// # Example
/// ```
/// use phylogroup::phyloref::{TreeLoader, TreeSource};
///
/// let loader = TreeLoader::new().with_preserve_underscores();
/// let trees = loader
///     .load("group", &TreeSource::Newick("(Rallus_aquaticus,Crex_crex);".to_string()))
///     .unwrap();
/// assert_eq!(trees[0].vertices()[0].taxon().unwrap().label(), "Rallus_aquaticus");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TreeLoader {
    base_dir: Option<PathBuf>,
    preserve_underscores: bool,
    skip_newick_annotations: bool,
}

impl TreeLoader {
    /// Creates a loader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the directory that relative NeXML paths are resolved against.
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, base_dir: P) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Configures Newick parsing to keep underscores in unquoted labels.
    pub fn with_preserve_underscores(mut self) -> Self {
        self.preserve_underscores = true;
        self
    }

    /// Configures Newick parsing to treat annotation blocks as comments.
    pub fn without_newick_annotations(mut self) -> Self {
        self.skip_newick_annotations = true;
        self
    }

    /// Loads all trees of the given source.
    ///
    /// # Arguments
    /// * `group_id` - Id of the phylogeny group, used in error messages
    /// * `source` - The tree source to load
    ///
    /// # Returns
    /// * `Ok(Vec<PhyloTree>)` - The trees in source order; empty for [TreeSource::Absent]
    /// * [LoadError::MissingFile] - If a NeXML file does not exist
    /// * [LoadError::Parse] - If the trees cannot be parsed
    pub fn load(&self, group_id: &str, source: &TreeSource) -> LoadResult<Vec<PhyloTree>> {
        match source {
            TreeSource::NeXml(path) => self.load_nexml(group_id, path),
            TreeSource::Newick(newick) => self.load_newick(group_id, newick),
            TreeSource::Absent => Ok(Vec::new()),
        }
    }

    /// Returns the path a NeXML file is read from.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base_dir) if path.is_relative() => base_dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    fn load_nexml(&self, group_id: &str, path: &Path) -> LoadResult<Vec<PhyloTree>> {
        let resolved = self.resolve(path);
        if !resolved.exists() {
            return Err(LoadError::missing_file(group_id, path));
        }

        nexml::parse_file(&resolved).map_err(|err| LoadError::parse(group_id, TreeFormat::NeXml, err))
    }

    fn load_newick(&self, group_id: &str, newick: &str) -> LoadResult<Vec<PhyloTree>> {
        let mut parser = NewickParser::new();
        if !self.skip_newick_annotations {
            parser = parser.with_annotations();
        }
        if self.preserve_underscores {
            parser = parser.with_preserve_underscores();
        }

        parser
            .parse_all(ByteParser::for_str(newick))
            .map_err(|err| LoadError::parse(group_id, TreeFormat::Newick, err))
    }
}
