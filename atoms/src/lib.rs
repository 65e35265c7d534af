//! Domain atoms shared by the governance views and the task board: proposal
//! records and their lifecycle, task/column records, and board users.

pub mod proposals;
pub mod tasks;
pub mod users;
