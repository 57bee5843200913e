//! Paged traversal helpers built on [`JoinTableModel::records`].

use crate::{
    error::SearchError,
    option::{CountOption, SearchOption},
    table::JoinTableModel,
};
use model::records::row::Row;
use tracing::{debug, trace};

impl JoinTableModel {
    /// Number of records matching the filter of `option`.
    pub async fn count(&self, option: &CountOption) -> Result<u64, SearchError> {
        self.count_matching(&SearchOption::from(option.clone())).await
    }

    /// Visits up to `option.limit` records starting at `option.offset`, fetching
    /// at most `page_size` rows per statement. Without a limit (or with 0) it
    /// reads until a page comes back short. `f` receives each record and its
    /// index relative to the starting offset.
    pub async fn for_each<F>(&self, option: &SearchOption, mut f: F) -> Result<(), SearchError>
    where
        F: FnMut(Row, usize),
    {
        let start = option.offset.unwrap_or(0);
        let total = option.limit.filter(|&limit| limit > 0);
        let page_size = self.defaults().page_size;

        let mut emitted = 0;
        loop {
            let want = match total {
                Some(total) => page_size.min(total - emitted),
                None => page_size,
            };
            if want == 0 {
                break;
            }
            let page = SearchOption {
                offset: Some(start + emitted),
                limit: Some(want),
                ..option.clone()
            };
            let rows = self.records(&page).await?;
            let fetched = rows.len();
            trace!(offset = start + emitted, want, fetched, "fetched page");

            for row in rows.into_iter().take(want) {
                f(row, emitted);
                emitted += 1;
            }
            if fetched < want {
                break;
            }
        }

        debug!(emitted, "traversal finished");
        Ok(())
    }

    /// Same traversal as [`for_each`](Self::for_each), collecting `f`'s results
    /// in record order.
    pub async fn map<T, F>(&self, option: &SearchOption, mut f: F) -> Result<Vec<T>, SearchError>
    where
        F: FnMut(Row, usize) -> T,
    {
        let mut out = Vec::new();
        self.for_each(option, |row, index| out.push(f(row, index)))
            .await?;
        Ok(out)
    }

    /// First record satisfying `predicate`.
    ///
    /// Reads from offset 0 with a page size that starts at 1 and doubles up to
    /// `find_limit_max`. Stops early once a read comes back short, since the
    /// matching set has then been read in full. The offset of `option` is not
    /// used.
    pub async fn find<P>(
        &self,
        option: &SearchOption,
        mut predicate: P,
    ) -> Result<Option<Row>, SearchError>
    where
        P: FnMut(&Row) -> bool,
    {
        let max = self.defaults().find_limit_max;
        let mut limit = 1;

        loop {
            let page = SearchOption {
                offset: Some(0),
                limit: Some(limit),
                ..option.clone()
            };
            let rows = self.records(&page).await?;
            let exhausted = rows.len() < limit;
            trace!(limit, fetched = rows.len(), "find page");

            if let Some(row) = rows.into_iter().find(|row| predicate(row)) {
                return Ok(Some(row));
            }
            if exhausted || limit >= max {
                debug!(limit, "find gave up without a match");
                return Ok(None);
            }
            limit = (limit * 2).min(max);
        }
    }
}
