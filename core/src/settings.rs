use alloc::format;
use alloc::string::{String, ToString};
use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::*;

/// Allowed width and height for custom boards.
pub const CUSTOM_SIDE_RANGE: RangeInclusive<Coord> = 5..=30;

/// Board presets offered by the menu, plus player-defined boards.
///
/// Width counts columns and height counts rows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Custom {
        width: Coord,
        height: Coord,
        mines: CellCount,
    },
}

impl Difficulty {
    pub const PRESETS: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Checked custom board.
    pub fn custom(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        let difficulty = Self::Custom {
            width,
            height,
            mines,
        };
        difficulty.validate()?;
        Ok(difficulty)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Custom { .. } => "Custom",
        }
    }

    pub const fn width(self) -> Coord {
        match self {
            Self::Easy => 9,
            Self::Medium => 16,
            Self::Hard => 30,
            Self::Custom { width, .. } => width,
        }
    }

    pub const fn height(self) -> Coord {
        match self {
            Self::Easy => 9,
            Self::Medium => 16,
            Self::Hard => 16,
            Self::Custom { height, .. } => height,
        }
    }

    pub const fn mines(self) -> CellCount {
        match self {
            Self::Easy => 10,
            Self::Medium => 40,
            Self::Hard => 99,
            Self::Custom { mines, .. } => mines,
        }
    }

    pub fn validate(self) -> Result<()> {
        let Self::Custom {
            width,
            height,
            mines,
        } = self
        else {
            return Ok(());
        };

        if !CUSTOM_SIDE_RANGE.contains(&width) {
            return Err(GameError::InvalidSettings(format!(
                "width {} outside {}..={}",
                width,
                CUSTOM_SIDE_RANGE.start(),
                CUSTOM_SIDE_RANGE.end()
            )));
        }
        if !CUSTOM_SIDE_RANGE.contains(&height) {
            return Err(GameError::InvalidSettings(format!(
                "height {} outside {}..={}",
                height,
                CUSTOM_SIDE_RANGE.start(),
                CUSTOM_SIDE_RANGE.end()
            )));
        }
        let max_mines = mult(width, height) - 1;
        if mines == 0 || mines > max_mines {
            return Err(GameError::InvalidSettings(format!(
                "{} mines outside 1..={} for a {}x{} board",
                mines, max_mines, width, height
            )));
        }
        Ok(())
    }

    pub fn game_config(self) -> Result<GameConfig> {
        self.validate()?;
        GameConfig::new((self.height(), self.width()), self.mines())
    }
}

/// Play mode label; coop has no networking behind it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Local,
    Coop,
}

impl GameMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Coop => "Coop",
        }
    }
}

/// Settings chosen in the menu before a game starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub player_name: String,
    pub difficulty: Difficulty,
    pub mode: GameMode,
}

impl GameSettings {
    pub fn game_config(&self) -> Result<GameConfig> {
        self.difficulty.game_config()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| GameError::Malformed(err.to_string()))
    }

    /// Parses settings, filling in defaults for missing fields and rejecting invalid boards.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self =
            serde_json::from_str(json).map_err(|err| GameError::Malformed(err.to_string()))?;
        settings.difficulty.validate()?;
        Ok(settings)
    }
}
