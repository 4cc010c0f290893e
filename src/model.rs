use serde::{Deserialize, Serialize};

/// One adoptable cat from the catalog
/// Identity is the position in the loaded list, there is no id field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cat {
    pub name: String,

    /// Avatar image reference, resolved against the bundled assets
    #[serde(alias = "avatarFilename")]
    pub avatar: String,

    pub introduction: String,

    #[serde(default)]
    pub adopted: bool,
}

impl Cat {
    pub fn new(name: &str, avatar: &str, introduction: &str) -> Self {
        Cat {
            name: name.to_string(),
            avatar: avatar.to_string(),
            introduction: introduction.to_string(),
            adopted: false,
        }
    }

    /// Label used by the adopt button
    pub fn adopt_label(&self) -> &'static str {
        if self.adopted {
            "Adopted"
        } else {
            "Adopt"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adopted_defaults_to_false() {
        let cat: Cat = serde_json::from_str(
            r#"{"name":"Tom","introduction":"A tabby","avatar":"tom"}"#,
        )
        .unwrap();

        assert_eq!(cat.name, "Tom");
        assert_eq!(cat.avatar, "tom");
        assert!(!cat.adopted);
    }

    #[test]
    fn test_avatar_filename_alias() {
        let cat: Cat = serde_json::from_str(
            r#"{"name":"Luna","introduction":"Shy","avatarFilename":"luna","adopted":true}"#,
        )
        .unwrap();

        assert_eq!(cat.avatar, "luna");
        assert!(cat.adopted);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let cat: Cat = serde_json::from_str(
            r#"{"name":"Oreo","introduction":"Tuxedo","avatar":"oreo","age":3,"tags":["loud"]}"#,
        )
        .unwrap();

        assert_eq!(cat, Cat::new("Oreo", "oreo", "Tuxedo"));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        let result: Result<Cat, _> =
            serde_json::from_str(r#"{"introduction":"No name","avatar":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_adopt_label() {
        let mut cat = Cat::new("Oreo", "oreo", "Tuxedo");
        assert_eq!(cat.adopt_label(), "Adopt");
        cat.adopted = true;
        assert_eq!(cat.adopt_label(), "Adopted");
    }
}
