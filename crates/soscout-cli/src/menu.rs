// The interactive menu loop. Every handler prints its outcome and returns
// to the menu - only terminal I/O failure bubbles out.

use dialoguer::{Input, Select};
use soscout_api::MAX_PAGESIZE;
use soscout_core::{
    render_users_or_message, Error, ListingQuery, Session, SortOrder, NO_USERS_MESSAGE,
};

/// Run the menu until the user picks Exit.
pub async fn run(session: &mut Session) -> anyhow::Result<()> {
    let items = vec![
        "1. Fetch and display Stack Overflow users",
        "2. Save users to file",
        "3. Bookmark a user",
        "4. Unbookmark a user",
        "5. Display bookmarked users",
        "6. Exit",
    ];

    loop {
        println!();
        let selection = Select::new()
            .with_prompt("Menu")
            .items(&items)
            .default(0)
            .interact()?;

        match selection {
            0 => fetch_and_display(session).await?,
            1 => export_to_file(session).await?,
            2 => bookmark_user(session)?,
            3 => unbookmark_user(session)?,
            4 => display_bookmarked(session).await,
            5 => {
                println!("Exiting the program.");
                break;
            }
            _ => {}
        }
    }
    Ok(())
}

async fn fetch_and_display(session: &mut Session) -> anyhow::Result<()> {
    let page: u32 = Input::new()
        .with_prompt("Enter the page number")
        .validate_with(|input: &u32| {
            if *input >= 1 {
                Ok(())
            } else {
                Err("Page number must be a positive integer greater than 0")
            }
        })
        .interact_text()?;

    let pagesize: u32 = Input::new()
        .with_prompt(format!(
            "Enter the number of users per page (max {})",
            MAX_PAGESIZE
        ))
        .validate_with(|input: &u32| {
            if (1..=MAX_PAGESIZE).contains(input) {
                Ok(())
            } else {
                Err("Number of users per page must be between 1 and 100")
            }
        })
        .interact_text()?;

    let query = ListingQuery {
        page,
        pagesize,
        ..Default::default()
    };

    match session.fetch_users(query).await {
        Ok(users) => println!("{}", render_users_or_message(&users)),
        Err(e) => {
            println!("Error fetching users: {}", e);
            println!("{}", NO_USERS_MESSAGE);
        }
    }
    Ok(())
}

async fn export_to_file(session: &mut Session) -> anyhow::Result<()> {
    let file_name: String = Input::new()
        .with_prompt("Enter the file name to save users")
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("File name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let orders = vec!["asc", "desc"];
    let order = match Select::new()
        .with_prompt("Sort order by user ID")
        .items(&orders)
        .default(0)
        .interact()?
    {
        0 => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    println!("Fetching users...");
    match session.export_users(file_name.trim(), order, None).await {
        Ok(path) => println!("Users have been successfully saved to {}", path.display()),
        Err(e) => println!("Error saving users to file: {}", e),
    }
    Ok(())
}

fn bookmark_user(session: &mut Session) -> anyhow::Result<()> {
    let user_id: u64 = Input::new()
        .with_prompt("Enter the user ID to bookmark")
        .interact_text()?;

    match session.bookmark(user_id) {
        Ok(()) => println!("User with ID {} has been bookmarked.", user_id),
        Err(Error::NotFetched(id)) => println!(
            "User ID {} not found in fetched users. Please fetch users before bookmarking.",
            id
        ),
        Err(e) => println!("Error bookmarking user: {}", e),
    }
    Ok(())
}

fn unbookmark_user(session: &mut Session) -> anyhow::Result<()> {
    let user_id: u64 = Input::new()
        .with_prompt("Enter the user ID to unbookmark")
        .interact_text()?;

    match session.unbookmark(user_id) {
        Ok(()) => println!("User with ID {} has been unbookmarked.", user_id),
        Err(Error::NotBookmarked(id)) => println!(
            "User with ID {} is not bookmarked. Please check the bookmarked user list.",
            id
        ),
        Err(e) => println!("Error unbookmarking user: {}", e),
    }
    Ok(())
}

async fn display_bookmarked(session: &Session) {
    if !session.has_bookmarks() {
        println!("No users are bookmarked.");
        return;
    }

    let users = session.bookmarked_users().await;
    if users.is_empty() {
        println!("No bookmarked users found.");
    } else {
        println!("Bookmarked Users:");
        println!("{}", render_users_or_message(&users));
    }
}
