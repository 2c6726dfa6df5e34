// ABOUTME: Seed deck for new editing sessions
// ABOUTME: Eight slides that show off every slide type and the presenter shortcuts

use crate::slide::{Slide, SlideType};

const ARCHITECTURE: &str = r#"graph TD
  Viewer[Viewer] --> Store[Deck Store]
  Editor[Editor] --> Store
  Themes[Themes] --> Store
  Store --> Backend[(Persistence)]"#;

const CODE_SAMPLE: &str = r#"struct User {
    id: String,
    name: String,
}

fn greet(user: &User) -> String {
    format!("Hello, {}!", user.name)
}"#;

/// The slides a fresh session starts with, ordered `0..8`.
pub fn sample_slides() -> Vec<Slide> {
    let mut code = Slide::new(SlideType::Code, "Code Example", 2)
        .with_id("3")
        .with_content("## Syntax highlighting");
    code.code = Some(CODE_SAMPLE.to_string());
    code.language = Some("rust".to_string());

    let mut quote = Slide::new(SlideType::Quote, "An Inspiring Quote", 3)
        .with_id("4")
        .with_content("The best presentation is the one that gets its message across clearly.");
    quote.quote = Some("Simplicity is the ultimate sophistication.".to_string());
    quote.author = Some("Leonardo da Vinci".to_string());

    let mut diagram = Slide::new(SlideType::Diagram, "System Architecture", 4)
        .with_id("5")
        .with_content("## Architecture overview");
    diagram.diagram = Some(ARCHITECTURE.to_string());

    vec![
        Slide::new(SlideType::Title, "Slide Presentation Template", 0)
            .with_id("1")
            .with_content(
                "A modern template for presentations\n\n\
                 Navigate with the arrow keys or tap the progress bar",
            ),
        Slide::new(SlideType::Content, "What You Will Learn", 1)
            .with_id("2")
            .with_content(
                "## Agenda\n\n\
                 - Available slide types\n\
                 - Writing Markdown\n\
                 - Syntax highlighting for code\n\
                 - Navigation and shortcuts\n\
                 - Customizing the theme",
            ),
        code,
        quote,
        diagram,
        Slide::new(SlideType::Content, "Available Features", 5)
            .with_id("6")
            .with_content(
                "## Full Markdown\n\n\
                 | Feature | Syntax |\n\
                 |---------|--------|\n\
                 | **Bold** | `**text**` |\n\
                 | *Italic* | `*text*` |\n\
                 | Link | `[text](url)` |",
            ),
        Slide::new(SlideType::Content, "Keyboard Shortcuts", 6)
            .with_id("7")
            .with_content(
                "## Quick navigation\n\n\
                 | Key | Action |\n\
                 |-----|--------|\n\
                 | `→` or `Space` | Next slide |\n\
                 | `←` | Previous slide |\n\
                 | `Home` | First slide |\n\
                 | `End` | Last slide |\n\
                 | `F` | Fullscreen |",
            ),
        Slide::new(SlideType::Title, "Thank You!", 7)
            .with_id("8")
            .with_content("Now it's your turn\n\n**Open the editor to get started**"),
    ]
}
