//! The two banner variants and their resolved styles.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use xibao_config::{Config, PresetConfig};
use xibao_render::TextStyle;

/// Which banner to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Preset {
    /// 喜报: red text with a yellow outline
    #[value(alias = "xibao")]
    Celebratory,
    /// 悲报: black text with a white outline
    #[value(alias = "beibao")]
    Lamenting,
}

impl Preset {
    pub fn all() -> [Preset; 2] {
        [Preset::Celebratory, Preset::Lamenting]
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Celebratory => "celebratory",
            Preset::Lamenting => "lamenting",
        }
    }

    /// Chat command word.
    pub fn command_word(self) -> &'static str {
        match self {
            Preset::Celebratory => "喜报",
            Preset::Lamenting => "悲报",
        }
    }

    /// ASCII alias of the command word.
    pub fn alias(self) -> &'static str {
        match self {
            Preset::Celebratory => "xibao",
            Preset::Lamenting => "beibao",
        }
    }

    pub fn config(self, config: &Config) -> &PresetConfig {
        match self {
            Preset::Celebratory => &config.celebratory,
            Preset::Lamenting => &config.lamenting,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Preset::all()
            .into_iter()
            .find(|p| {
                s.eq_ignore_ascii_case(p.name())
                    || s.eq_ignore_ascii_case(p.alias())
                    || s == p.command_word()
            })
            .ok_or_else(|| format!("unknown preset '{s}'"))
    }
}

/// A preset resolved against the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetStyle {
    pub preset: Preset,
    /// Absolute or `assets_dir`-relative background path
    pub background: PathBuf,
    pub style: TextStyle,
}

impl PresetStyle {
    pub fn from_config(preset: Preset, config: &Config) -> Self {
        let preset_config = preset.config(config);
        Self {
            preset,
            background: config.background_path(preset_config),
            style: TextStyle::from(preset_config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xibao_config::Color;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("celebratory".parse::<Preset>(), Ok(Preset::Celebratory));
        assert_eq!("XIBAO".parse::<Preset>(), Ok(Preset::Celebratory));
        assert_eq!("悲报".parse::<Preset>(), Ok(Preset::Lamenting));
        assert!("meh".parse::<Preset>().is_err());
    }

    #[test]
    fn test_default_styles() {
        let config = Config::default().with_assets_dir("/srv/xibao");
        let happy = PresetStyle::from_config(Preset::Celebratory, &config);
        assert_eq!(happy.background, PathBuf::from("/srv/xibao/xibao_bg.png"));
        assert_eq!(happy.style.fill, Color::RED);
        assert_eq!(happy.style.stroke.map(|s| s.color), Some(Color::YELLOW));

        let sad = PresetStyle::from_config(Preset::Lamenting, &config);
        assert_eq!(sad.background, PathBuf::from("/srv/xibao/beibao_bg.png"));
        assert_eq!(sad.style.fill, Color::BLACK);
        assert_eq!(sad.style.stroke.map(|s| s.color), Some(Color::WHITE));
    }
}
