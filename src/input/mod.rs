pub mod gesture_router;
