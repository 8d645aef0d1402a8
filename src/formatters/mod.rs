use chrono::DateTime;
use colored::Colorize;

use crate::schemas::{Comment, Page, Post};

const REDDIT_BASE: &str = "https://reddit.com";

fn format_timestamp(created_utc: i64) -> String {
    match DateTime::from_timestamp(created_utc, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => created_utc.to_string(),
    }
}

pub fn format_comment(comment: &Comment, use_color: bool) -> String {
    let timestamp = format_timestamp(comment.created_utc);
    let permalink = format!("{REDDIT_BASE}{}", comment.permalink());
    if use_color {
        format!(
            "{} {} {} ({})\n  {}\n  {}",
            timestamp.bright_blue(),
            format!("/r/{}", comment.subreddit).bright_green(),
            format!("/u/{}", comment.author).bright_yellow(),
            comment.score,
            comment.body,
            permalink.dimmed()
        )
    } else {
        format!(
            "{} /r/{} /u/{} ({})\n  {}\n  {}",
            timestamp, comment.subreddit, comment.author, comment.score, comment.body, permalink
        )
    }
}

pub fn format_post(post: &Post, use_color: bool) -> String {
    let timestamp = format_timestamp(post.created_utc);
    let link = format!("{REDDIT_BASE}/{}", post.id);
    if use_color {
        format!(
            "{} {} {} ({})\n  {}\n  {}\n  {}",
            timestamp.bright_blue(),
            format!("/r/{}", post.subreddit).bright_green(),
            format!("/u/{}", post.author).bright_yellow(),
            post.score,
            post.title.bold(),
            post.body(),
            link.dimmed()
        )
    } else {
        format!(
            "{} /r/{} /u/{} ({})\n  {}\n  {}\n  {}",
            timestamp,
            post.subreddit,
            post.author,
            post.score,
            post.title,
            post.body(),
            link
        )
    }
}

/// Render a whole result page, one block per item, in accumulated order.
pub fn format_page(page: &Page, use_color: bool) -> String {
    match page {
        Page::Comments(items) => items
            .iter()
            .map(|c| format_comment(c, use_color))
            .collect::<Vec<_>>()
            .join("\n"),
        Page::Posts(items) => items
            .iter()
            .map(|p| format_post(p, use_color))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
