//! The closed set of hosting platforms a repository or target can live on.

use serde::{Deserialize, Serialize};

/// Hosting platform type shared by repositories and replication targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Github,
    Gitlab,
    Gitea,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Self::Github, Self::Gitlab, Self::Gitea];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Github => "github",
            Self::Gitlab => "gitlab",
            Self::Gitea => "gitea",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "github" => Ok(Self::Github),
            "gitlab" => Ok(Self::Gitlab),
            "gitea"  => Ok(Self::Gitea),
            other    => Err(format!("unknown provider: {other}")),
        }
    }
}
