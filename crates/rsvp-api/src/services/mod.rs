// Services layer for business logic
// Services sit between the HTTP routes and storage

pub mod rsvp;

pub use rsvp::RsvpService;
