//! Display options and the asset key they resolve to

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    Small,
    Large,
}

impl Size {
    pub const ALL: [Size; 2] = [Size::Small, Size::Large];

    pub fn dir_name(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    Regular,
    Shiny,
}

impl Palette {
    pub const ALL: [Palette; 2] = [Palette::Regular, Palette::Shiny];

    pub fn dir_name(self) -> &'static str {
        match self {
            Palette::Regular => "regular",
            Palette::Shiny => "shiny",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    pub shiny: bool,
    pub large: bool,
    pub show_title: bool,
    pub form: Option<String>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            shiny: false,
            large: false,
            show_title: true,
            form: None,
        }
    }
}

impl DisplayOptions {
    pub fn size(&self) -> Size {
        if self.large {
            Size::Large
        } else {
            Size::Small
        }
    }

    pub fn palette(&self) -> Palette {
        if self.shiny {
            Palette::Shiny
        } else {
            Palette::Regular
        }
    }

    /// The requested form, treating an empty string as no form.
    pub fn requested_form(&self) -> Option<&str> {
        self.form.as_deref().filter(|f| !f.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub size: Size,
    pub palette: Palette,
    pub qualified_name: String,
}

impl AssetKey {
    pub fn new(size: Size, palette: Palette, qualified_name: impl Into<String>) -> Self {
        Self {
            size,
            palette,
            qualified_name: qualified_name.into(),
        }
    }

    /// `<size>/<palette>/<qualified name>`, relative to the art root.
    pub fn relative_path(&self) -> PathBuf {
        [
            self.size.dir_name(),
            self.palette.dir_name(),
            self.qualified_name.as_str(),
        ]
        .iter()
        .collect()
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.size.dir_name(),
            self.palette.dir_name(),
            self.qualified_name
        )
    }
}
