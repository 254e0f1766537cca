pub const NOTIFICATION_KEYFRAMES_ID: &str = "notification-keyframes";

pub const NOTIFICATION_KEYFRAMES_CSS: &str = r#"
@keyframes slideInRight {
    from {
        transform: translateX(100%);
        opacity: 0;
    }
    to {
        transform: translateX(0);
        opacity: 1;
    }
}

@keyframes slideOutRight {
    from {
        transform: translateX(0);
        opacity: 1;
    }
    to {
        transform: translateX(100%);
        opacity: 0;
    }
}
"#;

pub const NOTIFICATION_CLOSE_STYLE: &str = "background: none; border: none; color: inherit; font-size: 1.2rem; cursor: pointer; margin-left: 1rem;";

pub const NOTIFICATION_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("padding", "1rem 1.5rem"),
    ("border-radius", "var(--radius)"),
    ("color", "white"),
    ("font-weight", "600"),
    ("z-index", "1000"),
    ("display", "flex"),
    ("align-items", "center"),
    ("max-width", "400px"),
    ("box-shadow", "var(--shadow-lg)"),
    ("animation", "slideInRight 0.3s ease"),
];
