// Built-in ACME fact responses. Replace these to repurpose the skill.

pub(crate) fn launch() -> &'static str {
    "<speak>Welcome to the 411 for ACME Inc. This skill provides information about ACME, a really cool company located in Silicon Valley of the South.</speak>"
}

pub(crate) fn help() -> &'static str {
    "<speak>This skill provides some basic information about ACME. You can ask for our location, contact info, and upcoming events.</speak>"
}

pub(crate) fn end() -> &'static str {
    "<speak>Thank you for asking about our business. Have a nice day!</speak>"
}

pub(crate) fn about() -> &'static str {
    "<speak>Welcome to ACME Inc. We are the coolest company located in the Silicon Valley of the South. We love our employees, customers, and the environment.</speak>"
}

pub(crate) fn contact() -> &'static str {
    "<speak>The best way to reach us is at info at acme dot com. You can also leave us voice mail at 8 0 4, 5 5 5, 1 2 1 2. We are also on twitter, at acme S V O S.</speak>"
}

pub(crate) fn upcoming() -> &'static str {
    "<speak>Check us out at Stir Trek dot com. We will be in Columbus, Ohio on May  5th!</speak>"
}
