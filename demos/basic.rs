//! Basic example demonstrating the Mavenlink API client.
//!
//! Run with:
//! ```
//! MAVENLINK_ACCESS_TOKEN=your-token cargo run --example basic
//! ```

use mavenlink::MavenlinkApi;

#[tokio::main]
async fn main() -> mavenlink::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create API from environment variables
    println!("Creating Mavenlink client...");
    let api = MavenlinkApi::from_env()?;

    // First page of projects
    println!("\n--- Listing Projects (first page) ---");
    let page = api.get_projects(1).await?;
    println!(
        "Found {} projects on this page (total: {}, pages: {})",
        page.len(),
        page.meta.total_items,
        page.meta.total_pages
    );

    for project in page.iter().take(10) {
        println!("  - {} ({})", project["title"], project["id"]);
    }

    // Tasks with their assignees embedded
    println!("\n--- Tasks ---");
    let tasks = api.get_all_tasks().await?;
    println!("Found {} tasks", tasks.len());

    for task in tasks.iter().take(5) {
        let names: Vec<&str> = task
            .get("assignees")
            .and_then(|a| a.as_array())
            .map(|a| a.iter().filter_map(|u| u["full_name"].as_str()).collect())
            .unwrap_or_default();
        println!("  - {} [{}]", task["title"], names.join(", "));
    }

    // Comments for the first project
    if let Some(project_id) = page.data.first().and_then(|p| p["id"].as_str()) {
        println!("\n--- Comments for project {project_id} ---");
        let comments = api.get_all_comments_for_project(project_id).await?;
        println!("Found {} comments", comments.len());
    }

    println!("\nDone!");
    Ok(())
}
