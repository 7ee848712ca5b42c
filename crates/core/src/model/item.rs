use magdock_protocol::SharedStr;
use serde::{Deserialize, Serialize};

/// An item as it appears in a config file: label and asset, no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub label: SharedStr,
    /// Image URL or path. Hosts that cannot load it draw a fallback.
    #[serde(default)]
    pub asset: SharedStr,
}

impl ItemSpec {
    pub fn new(label: impl Into<SharedStr>, asset: impl Into<SharedStr>) -> Self {
        Self {
            label: label.into(),
            asset: asset.into(),
        }
    }

    /// The stock six-icon dock.
    pub fn default_set() -> Vec<ItemSpec> {
        const CDN: &str = "https://cdn.jim-nielsen.com/macos";
        [
            ("Finder", "1024/finder-2021-09-10.png?rf=1024"),
            ("Messages", "1024/messages-2021-05-25.png?rf=1024"),
            ("Music", "1024/music-2021-05-25.png?rf=1024"),
            ("Final Cut Pro", "512/final-cut-pro-2015-04-14.png?rf=512"),
            ("Podcasts", "1024/podcasts-2021-05-28.png?rf=1024"),
            ("Notes", "1024/notes-2021-05-25.png?rf=1024"),
        ]
        .into_iter()
        .map(|(label, path)| ItemSpec::new(label, format!("{CDN}/{path}")))
        .collect()
    }
}

/// A dock item with its stable position in the row.
///
/// The list is fixed for the lifetime of a session; `index` is both the
/// identity and the layout order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DockItem {
    pub index: usize,
    pub label: SharedStr,
    pub asset: SharedStr,
}

impl DockItem {
    /// Number a list of specs in order.
    pub fn from_specs(specs: &[ItemSpec]) -> Vec<DockItem> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| DockItem {
                index,
                label: spec.label.clone(),
                asset: spec.asset.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_matches_stock_dock() {
        let items = DockItem::from_specs(&ItemSpec::default_set());
        let labels: Vec<&str> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Finder", "Messages", "Music", "Final Cut Pro", "Podcasts", "Notes"]
        );
        assert!(items[3].asset.ends_with("final-cut-pro-2015-04-14.png?rf=512"));
        for (i, item) in items.iter().enumerate() {
            assert_eq!(item.index, i);
        }
    }
}
