//! Test infrastructure shared by service tests.


pub(crate) use context::{TestContext, insert_account};
pub(crate) use db::TestDb;
pub(crate) use fakes::{RecordingEmailSender, RecordingPhotoStorage, SentEmail};
