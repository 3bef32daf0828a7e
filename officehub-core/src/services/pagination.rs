use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{ConnectionTrait, Order, PaginatorTrait, QueryOrder, QuerySelect, Select};

use crate::config::PaginationConfig;
use crate::database::entities::LifecycleEntity;
use crate::errors::{EntityError, EntityResult};

/// A validated page window. Pages are zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }
    }

    /// Build a request from raw query arguments. No page means "return
    /// everything"; a negative page is clamped to the first one.
    pub fn from_args(
        page: Option<i32>,
        per_page: Option<i32>,
        config: &PaginationConfig,
    ) -> EntityResult<Option<Self>> {
        let Some(page) = page else {
            return Ok(None);
        };

        let per_page = match per_page {
            None => config.default_per_page,
            Some(n) if n <= 0 => {
                return Err(EntityError::validation("perPage must be greater than zero"));
            }
            Some(n) => (n as u64).min(config.max_per_page),
        };

        Ok(Some(Self::new(normalize_page(page), per_page.max(1))))
    }

    pub fn offset(&self) -> u64 {
        self.page * self.per_page
    }
}

pub fn normalize_page(page: i32) -> u64 {
    page.max(0) as u64
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<M> {
    pub items: Vec<M>,
    pub page: u64,
    pub per_page: u64,
    /// Row count of the whole filtered set, not just this window
    pub total: u64,
}

impl<M> PageWindow<M> {
    pub fn pages(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Page<M> {
    All(Vec<M>),
    Window(PageWindow<M>),
}

impl<M> Page<M> {
    pub fn items(&self) -> &[M] {
        match self {
            Page::All(items) => items,
            Page::Window(window) => &window.items,
        }
    }

    pub fn into_items(self) -> Vec<M> {
        match self {
            Page::All(items) => items,
            Page::Window(window) => window.items,
        }
    }

    pub fn window(&self) -> Option<&PageWindow<M>> {
        match self {
            Page::All(_) => None,
            Page::Window(window) => Some(window),
        }
    }
}

/// Order `select` by the case-folded sort field of `E` and cut the
/// requested window out of it. `collection` names the rows in the
/// out-of-range error, e.g. "offices".
pub async fn paginate<C, E>(
    db: &C,
    select: Select<E>,
    request: Option<PageRequest>,
    collection: &str,
) -> EntityResult<Page<E::Model>>
where
    C: ConnectionTrait,
    E: LifecycleEntity,
    E::Model: Sync,
{
    let sort: SimpleExpr = Expr::col((E::default(), E::sort_column())).into();
    let ordered = select
        .order_by(SimpleExpr::FunctionCall(Func::lower(sort.clone())), Order::Asc)
        .order_by(sort, Order::Asc);

    let Some(request) = request else {
        return Ok(Page::All(ordered.all(db).await?));
    };

    let total = ordered.clone().count(db).await?;
    let items = ordered
        .offset(request.offset())
        .limit(request.per_page)
        .all(db)
        .await?;

    if items.is_empty() && request.page > 0 {
        tracing::debug!(collection, page = request.page, total, "page out of range");
        return Err(EntityError::page_out_of_range(collection, request.page));
    }

    Ok(Page::Window(PageWindow {
        items,
        page: request.page,
        per_page: request.per_page,
        total,
    }))
}
