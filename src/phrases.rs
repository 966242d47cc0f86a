//! Canned phrases spoken by DSA Bot, plus the intro script and quick replies.

use serde::{Deserialize, Serialize};

/// Symbolic key for a canned phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PhraseKey {
    Greeting,
    WhatIsDsa,
    HelpChoose,
    SortingExplain,
    Complexity,
    StudyTips,
    Interview,
    AlgorithmsChoice,
    DataStructureChoice,
    Goodbye,
    Hello,
    Thanks,
    Trees,
    Graphs,
    Arrays,
    Default,
}

impl PhraseKey {
    pub fn text(&self) -> &'static str {
        match self {
            PhraseKey::Greeting => "Hi there! I'm DSA Bot, your friendly coding assistant! 🤖 I'm here to help you master Data Structures and Algorithms. What would you like to learn today?",
            PhraseKey::WhatIsDsa => "DSA stands for Data Structures and Algorithms! Data structures are ways to organize and store data (like arrays, trees, graphs), while algorithms are step-by-step procedures to solve problems. Together, they're the foundation of efficient programming!",
            PhraseKey::HelpChoose => "Great question! It depends on what you want to learn:\n\n🔸 New to DSA? Start with Arrays and Sorting\n🔸 Want to understand hierarchies? Try Trees\n🔸 Love problem-solving? Explore Graph algorithms\n🔸 Need speed? Learn about Hash Tables\n\nWhat interests you most?",
            PhraseKey::SortingExplain => "Sorting algorithms arrange elements in order! Here are the main types:\n\n🔸 **Bubble Sort**: Simple but slow - good for learning\n🔸 **Quick Sort**: Fast and popular - great for interviews\n🔸 **Merge Sort**: Stable and reliable - perfect for large data\n\nWant to visualize any of these?",
            PhraseKey::Complexity => "Time complexity tells us how algorithm performance scales with input size:\n\n🔸 **O(1)**: Constant - always same time\n🔸 **O(log n)**: Logarithmic - very efficient\n🔸 **O(n)**: Linear - proportional to input\n🔸 **O(n²)**: Quadratic - can be slow for large inputs\n\nWant to see examples?",
            PhraseKey::StudyTips => "Here are my top study tips for mastering DSA:\n\n📚 **Start with basics**: Arrays, strings, and loops\n🔍 **Practice daily**: Even 30 minutes helps!\n📝 **Code by hand**: Builds muscle memory\n🎯 **Focus on patterns**: Many problems use similar approaches\n💡 **Understand, don't memorize**: Know the 'why' behind algorithms\n\nWant specific resources?",
            PhraseKey::Interview => "Interview preparation tips:\n\n🎯 **Master the fundamentals**: Arrays, strings, hash maps\n⏰ **Practice time management**: Use a timer\n🗣️ **Think out loud**: Explain your approach\n🐛 **Test your code**: Walk through examples\n📊 **Know complexities**: Time and space analysis\n\nWant to practice with specific topics?",
            PhraseKey::AlgorithmsChoice => "Excellent choice! Let's dive into algorithms and learn step-by-step problem solving!",
            PhraseKey::DataStructureChoice => "Great decision! Data structures are the building blocks of efficient programming!",
            PhraseKey::Goodbye => "Taking you there now... Happy learning! 🚀",
            PhraseKey::Hello => "Hello! 👋 I'm excited to help you with your DSA journey. What would you like to explore today?",
            PhraseKey::Thanks => "You're very welcome! 😊 I'm always here to help you master algorithms and data structures. Keep coding!",
            PhraseKey::Trees => "Trees are fascinating data structures! 🌳 They're hierarchical structures perfect for organizing data. Binary trees, BSTs, and AVL trees each have unique properties. Want to explore any specific tree algorithm?",
            PhraseKey::Graphs => "Graphs are powerful for modeling relationships! 🕸️ DFS explores deep paths first, while BFS explores level by level. Both are essential for traversal and pathfinding. Which one interests you more?",
            PhraseKey::Arrays => "Arrays are the foundation of programming! 📊 Linear search is simple but can be slow. For sorted arrays, binary search is much faster at O(log n). Want to see how they compare?",
            PhraseKey::Default => "That's a great question! I can help you with:\n\n✨ Algorithm explanations\n🎯 Complexity analysis\n🚀 Learning roadmaps\n💡 Interview tips\n\nTry asking me about specific algorithms or concepts!",
        }
    }
}

/// Preset chat inputs, equivalent to typing the same text.
pub const QUICK_REPLIES: [&str; 6] = [
    "What is DSA?",
    "Help me choose an algorithm",
    "Explain sorting algorithms",
    "Show complexity analysis",
    "Give me study tips",
    "Interview preparation",
];

/// Status lines cycled while the robot is "booting".
pub const INTRO_MESSAGES: [&str; 5] = [
    "🤖 Initializing DSA Bot...",
    "🔧 Loading algorithm database...",
    "⚡ Calibrating neural networks...",
    "🚀 Welcome to DSA Visualizer!",
    "✨ Ready to make learning fun!",
];

pub const PRACTICE_NOTICE: &str =
    "Practice section coming soon! For now, try exploring the algorithm visualizations.";

pub fn about_notice() -> String {
    format!(
        "DSA Visualizer v{}\n\nAn interactive learning platform for Data Structures and Algorithms.\n\nBuilt with love for students and developers! 🚀",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn visualize_notice(name: &str) -> String {
    format!("Launching {} visualization...", name)
}

pub fn visualize_message(name: &str) -> String {
    format!(
        "Great choice! {} is an excellent algorithm to learn. The visualization will help you understand how it works step by step. Would you like me to explain any concepts while you explore?",
        name
    )
}
