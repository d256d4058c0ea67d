//! Grid of string cells under a single header row.
//!
//! Positions passed to [`Sheet`] are zero-based data-row indexes; the header
//! row is addressed separately.

use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use crate::schema::HeaderStyle;

#[async_trait]
pub trait Sheet: Send + Sync {
    /// Header cells; empty when the sheet has no header yet.
    async fn header(&self) -> Result<Vec<String>>;

    /// Replace the header cells. `None` keeps whatever style is already set.
    async fn write_header(&self, cells: &[String], style: Option<&HeaderStyle>) -> Result<()>;

    /// Every data row, in storage order.
    async fn rows(&self) -> Result<Vec<Vec<String>>>;

    /// One cell per data row for the given column.
    async fn column(&self, index: usize) -> Result<Vec<String>> {
        Ok(self
            .rows()
            .await?
            .into_iter()
            .map(|mut row| {
                if index < row.len() {
                    row.swap_remove(index)
                } else {
                    String::new()
                }
            })
            .collect())
    }

    /// Add a row after the last data row.
    async fn append_row(&self, cells: Vec<String>) -> Result<()>;

    /// Overwrite the row at `position`.
    async fn write_row(&self, position: usize, cells: Vec<String>) -> Result<()>;

    /// Remove the row at `position`; later rows move up by one.
    async fn delete_row(&self, position: usize) -> Result<()>;

    /// Remove every data row, leaving the header in place.
    async fn clear_rows(&self) -> Result<()>;

    /// Swap in new header cells and data rows as one step. On error the sheet
    /// keeps its previous contents. The header style is left as is.
    async fn replace(&self, header: &[String], rows: Vec<Vec<String>>) -> Result<()>;

    /// Write `rows` contiguously after the current last data row.
    async fn write_rows(&self, rows: Vec<Vec<String>>) -> Result<()> {
        for row in rows {
            self.append_row(row).await?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Grid {
    header: Vec<String>,
    style: Option<HeaderStyle>,
    rows: Vec<Vec<String>>,
}

#[derive(Debug, Default)]
pub struct MemorySheet {
    grid: Mutex<Grid>,
}

impl MemorySheet {
    pub fn with_header(cells: Vec<String>) -> Self {
        Self {
            grid: Mutex::new(Grid {
                header: cells,
                ..Grid::default()
            }),
        }
    }

    pub fn with_rows(self, rows: Vec<Vec<String>>) -> Self {
        if let Ok(mut grid) = self.grid.lock() {
            grid.rows = rows;
        }
        self
    }

    pub fn header_style(&self) -> Option<HeaderStyle> {
        self.grid.lock().ok().and_then(|grid| grid.style.clone())
    }

    fn with_grid<T>(&self, f: impl FnOnce(&mut Grid) -> Result<T>) -> Result<T> {
        let mut grid = self
            .grid
            .lock()
            .map_err(|_| anyhow!("sheet lock poisoned"))?;
        f(&mut grid)
    }
}

#[async_trait]
impl Sheet for MemorySheet {
    async fn header(&self) -> Result<Vec<String>> {
        self.with_grid(|grid| Ok(grid.header.clone()))
    }

    async fn write_header(&self, cells: &[String], style: Option<&HeaderStyle>) -> Result<()> {
        self.with_grid(|grid| {
            grid.header = cells.to_vec();
            if let Some(style) = style {
                grid.style = Some(style.clone());
            }
            Ok(())
        })
    }

    async fn rows(&self) -> Result<Vec<Vec<String>>> {
        self.with_grid(|grid| Ok(grid.rows.clone()))
    }

    async fn column(&self, index: usize) -> Result<Vec<String>> {
        self.with_grid(|grid| {
            Ok(grid
                .rows
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or_default())
                .collect())
        })
    }

    async fn append_row(&self, cells: Vec<String>) -> Result<()> {
        self.with_grid(|grid| {
            grid.rows.push(cells);
            Ok(())
        })
    }

    async fn write_row(&self, position: usize, cells: Vec<String>) -> Result<()> {
        self.with_grid(|grid| {
            let row = grid
                .rows
                .get_mut(position)
                .ok_or_else(|| anyhow!("row {position} out of range"))?;
            *row = cells;
            Ok(())
        })
    }

    async fn delete_row(&self, position: usize) -> Result<()> {
        self.with_grid(|grid| {
            if position >= grid.rows.len() {
                return Err(anyhow!("row {position} out of range"));
            }
            grid.rows.remove(position);
            Ok(())
        })
    }

    async fn clear_rows(&self) -> Result<()> {
        self.with_grid(|grid| {
            grid.rows.clear();
            Ok(())
        })
    }

    async fn replace(&self, header: &[String], rows: Vec<Vec<String>>) -> Result<()> {
        self.with_grid(|grid| {
            grid.header = header.to_vec();
            grid.rows = rows;
            Ok(())
        })
    }
}
