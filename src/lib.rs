/*!
# Recruitment Tracker

Keeps the derived columns of a recruitment tracking sheet up to date: how
many days have passed since each candidate, client and remark date, and how
many times the candidate and client dates have been followed up.

## Overview

Each data row of the sheet is one placement in progress. Users edit dates and
the status by hand; the tracker reacts to those edits and fills in the
derived columns. A daily batch run refreshes every gap so the numbers stay
correct as days pass without edits.

## Architecture

### Leaf Components
- **Date Parser** - Turns `day/month/year` text (`/`, `-` or `.` separated) or
  real date-time cells into calendar dates
- **Gap Calculator** - Whole days since a date, not counting today, floored at
  zero

### Edit Handling
- **Edit Reactor** - Per-edit state machine. Candidate and client date edits
  move their follow-up counters, status changes stamp the remark date, and
  any tracked edit refreshes the row's gaps

### Batch Handling
- **Full Recompute** - Every row, every gap, after checking the header
- **Column Fast Path** - One gap column in a single bulk read and write

### Table Access
- **TableStore** - The trait the tracker reads and writes through
- **Spreadsheet** - In-memory store, loadable from and exportable to CSV

## Column Layout

Columns are found by header name (defaults shown, all configurable):

| Role | Header |
|------|--------|
| Candidate date | `Cand_Date_update` |
| Candidate follow-ups | `Cand_followup` |
| Client date | `Client_Date_update` |
| Client follow-ups | `Client_followup` |
| Status | `Status` |
| Remark date | `Remark_date_change` |
| Gaps | `candidate_gap`, `client_gap`, `Remark_gap` |

## Modules

- **cell**: Cell values held by the store
- **store**: The `TableStore` trait
- **spreadsheet**: In-memory `TableStore`
- **schema**: Column roles resolved from the header row
- **config**: Column names, remark stamp format and batch exclusions
- **clock**: Injectable source of today's date
- **date_parser**: Date normalization
- **gap**: Gap rule
- **record**: One row read through the schema
- **reactor**: Live edit handling
- **bulk**: Batch recomputes
- **loader** / **downloader**: CSV import and export
*/

pub mod bulk;
pub mod cell;
pub mod clock;
pub mod config;
pub mod date_parser;
pub mod downloader;
pub mod error;
pub mod gap;
pub mod loader;
pub mod reactor;
pub mod record;
pub mod schema;
pub mod spreadsheet;
pub mod store;

/// Re-export everything from these modules to make it easier to use
pub use bulk::*;
pub use cell::*;
pub use clock::*;
pub use config::*;
pub use date_parser::*;
pub use downloader::*;
pub use error::*;
pub use gap::*;
pub use loader::*;
pub use reactor::*;
pub use record::*;
pub use schema::*;
pub use spreadsheet::*;
pub use store::*;
