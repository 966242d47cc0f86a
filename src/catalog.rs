//! Static catalog of algorithms and data structures shown on the landing page.

use serde::{Deserialize, Serialize};

/// Category filter for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    All,
    Sorting,
    Searching,
    Trees,
    Graphs,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Sorting => "sorting",
            Category::Searching => "searching",
            Category::Trees => "trees",
            Category::Graphs => "graphs",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Category::All),
            "sorting" => Some(Category::Sorting),
            "searching" => Some(Category::Searching),
            "trees" => Some(Category::Trees),
            "graphs" => Some(Category::Graphs),
            _ => None,
        }
    }

    /// Every filter value, in tab order.
    pub fn all() -> [Category; 5] {
        [
            Category::All,
            Category::Sorting,
            Category::Searching,
            Category::Trees,
            Category::Graphs,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Sorting => "Sorting",
            Category::Searching => "Searching",
            Category::Trees => "Trees",
            Category::Graphs => "Graphs",
        }
    }

    pub fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|c| c == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Display metadata for one algorithm or data structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
    pub complexity: String,
}

impl CatalogEntry {
    fn new(name: &str, description: &str, complexity: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            complexity: complexity.to_string(),
        }
    }
}

/// Entries grouped by category. Group order and entry order are the declared
/// order and are never sorted.
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: Vec<(Category, Vec<CatalogEntry>)>,
}

impl Catalog {
    pub fn new() -> Self {
        let groups = vec![
            (
                Category::Sorting,
                vec![
                    CatalogEntry::new("Bubble Sort", "Simple comparison-based sorting algorithm", "O(n²)"),
                    CatalogEntry::new("Quick Sort", "Divide-and-conquer sorting algorithm", "O(n log n)"),
                    CatalogEntry::new("Merge Sort", "Stable divide-and-conquer sorting", "O(n log n)"),
                    CatalogEntry::new("Heap Sort", "Comparison-based sorting using binary heap", "O(n log n)"),
                ],
            ),
            (
                Category::Searching,
                vec![
                    CatalogEntry::new("Linear Search", "Sequential search through elements", "O(n)"),
                    CatalogEntry::new("Binary Search", "Divide-and-conquer search in sorted array", "O(log n)"),
                    CatalogEntry::new("Hash Table", "Key-value pair data structure", "O(1) average"),
                ],
            ),
            (
                Category::Trees,
                vec![
                    CatalogEntry::new("Binary Tree", "Hierarchical data structure", "O(log n)"),
                    CatalogEntry::new("BST", "Binary Search Tree with ordering property", "O(log n)"),
                    CatalogEntry::new("AVL Tree", "Self-balancing binary search tree", "O(log n)"),
                ],
            ),
            (
                Category::Graphs,
                vec![
                    CatalogEntry::new("DFS", "Depth-First Search traversal", "O(V + E)"),
                    CatalogEntry::new("BFS", "Breadth-First Search traversal", "O(V + E)"),
                    CatalogEntry::new("Dijkstra", "Shortest path algorithm", "O(V log V + E)"),
                ],
            ),
        ];

        Self { groups }
    }

    /// Entries visible under `category`.
    pub fn entries(&self, category: Category) -> Vec<&CatalogEntry> {
        match category {
            Category::All => self.groups.iter().flat_map(|(_, entries)| entries.iter()).collect(),
            cat => self
                .groups
                .iter()
                .filter(|(c, _)| *c == cat)
                .flat_map(|(_, entries)| entries.iter())
                .collect(),
        }
    }

    pub fn find(&self, name: &str) -> Option<&CatalogEntry> {
        self.groups
            .iter()
            .flat_map(|(_, entries)| entries.iter())
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(entries: &[&CatalogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    }

    #[test]
    fn test_trees_in_declared_order() {
        let catalog = Catalog::new();
        let trees = catalog.entries(Category::Trees);
        assert_eq!(names(&trees), vec!["Binary Tree", "BST", "AVL Tree"]);
    }

    #[test]
    fn test_all_concatenates_categories_in_order() {
        let catalog = Catalog::new();
        let mut expected = Vec::new();
        for cat in [Category::Sorting, Category::Searching, Category::Trees, Category::Graphs] {
            expected.extend(names(&catalog.entries(cat)));
        }
        let all = catalog.entries(Category::All);
        assert_eq!(names(&all), expected);
        assert_eq!(all.len(), 13);
        assert_eq!(all[0].name, "Bubble Sort");
        assert_eq!(all[12].name, "Dijkstra");
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!(Category::from_str("Trees"), Some(Category::Trees));
        assert_eq!(Category::from_str(" all "), Some(Category::All));
        assert_eq!(Category::from_str("heaps"), None);
    }

    #[test]
    fn test_category_cycle_wraps() {
        assert_eq!(Category::Graphs.next(), Category::All);
        assert_eq!(Category::All.prev(), Category::Graphs);
        assert_eq!(Category::Sorting.next(), Category::Searching);
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let catalog = Catalog::new();
        assert_eq!(catalog.find("dijkstra").map(|e| e.complexity.as_str()), Some("O(V log V + E)"));
        assert!(catalog.find("Radix Sort").is_none());
    }
}
