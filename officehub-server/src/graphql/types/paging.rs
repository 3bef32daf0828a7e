use async_graphql::*;
use officehub::services::Page;

use crate::graphql::types::{Office, Room, User};

/// A listing plus its page metadata. Unpaged listings carry no counts.
#[derive(SimpleObject)]
#[graphql(concrete(name = "PaginatedOffices", params(Office)))]
#[graphql(concrete(name = "PaginatedRooms", params(Room)))]
#[graphql(concrete(name = "PaginatedUsers", params(User)))]
pub struct Paginated<T: OutputType> {
    pub items: Vec<T>,
    pub pages: Option<u64>,
    pub query_total: Option<u64>,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T: OutputType> Paginated<T> {
    pub fn from_page<M>(page: Page<M>) -> Self
    where
        T: From<M>,
    {
        match page {
            Page::All(items) => Self {
                items: items.into_iter().map(T::from).collect(),
                pages: None,
                query_total: None,
                has_next: false,
                has_previous: false,
            },
            Page::Window(window) => Self {
                pages: Some(window.pages()),
                query_total: Some(window.total),
                has_next: window.has_next(),
                has_previous: window.has_previous(),
                items: window.items.into_iter().map(T::from).collect(),
            },
        }
    }
}
