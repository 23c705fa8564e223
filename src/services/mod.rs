pub mod messages;

pub(crate) use messages::MessageService;
