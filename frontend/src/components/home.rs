use crate::components::icons::{CheckCircle, ClipboardList, Users};
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="min-h-screen bg-base-200 flex flex-col">
            <div class="hero flex-1">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <div class="flex justify-center mb-6">
                            <div class="p-4 bg-primary/10 rounded-2xl text-primary">
                                <ClipboardList attr:class="h-12 w-12" />
                            </div>
                        </div>
                        <h1 class="text-5xl font-bold">"TaskFlow"</h1>
                        <p class="py-6 text-base-content/70">
                            "Organize your team, assign tasks and track progress in one place. \
                             Register a team to get started, or sign in to pick up where you left off."
                        </p>
                        <div class="flex justify-center gap-4">
                            <Link to="/login" class="btn btn-primary">"Sign In"</Link>
                            <Link to="/register" class="btn btn-outline">"Create a Team"</Link>
                        </div>

                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-12">
                            <div class="card bg-base-100 shadow">
                                <div class="card-body items-center text-center">
                                    <Users attr:class="h-8 w-8 text-primary" />
                                    <h2 class="card-title text-lg">"Manage Members"</h2>
                                    <p class="text-sm text-base-content/70">
                                        "Admins add, edit and remove team members."
                                    </p>
                                </div>
                            </div>
                            <div class="card bg-base-100 shadow">
                                <div class="card-body items-center text-center">
                                    <ClipboardList attr:class="h-8 w-8 text-primary" />
                                    <h2 class="card-title text-lg">"Assign Tasks"</h2>
                                    <p class="text-sm text-base-content/70">
                                        "Create tasks with deadlines and assign them to members."
                                    </p>
                                </div>
                            </div>
                            <div class="card bg-base-100 shadow">
                                <div class="card-body items-center text-center">
                                    <CheckCircle attr:class="h-8 w-8 text-primary" />
                                    <h2 class="card-title text-lg">"Track Progress"</h2>
                                    <p class="text-sm text-base-content/70">
                                        "Members see their own tasks and mark them done."
                                    </p>
                                </div>
                            </div>
                        </div>
                    </div>
                </div>
            </div>
            <footer class="footer footer-center p-4 text-base-content/50 text-sm">
                <p>"TaskFlow — lightweight team task management"</p>
            </footer>
        </div>
    }
}
